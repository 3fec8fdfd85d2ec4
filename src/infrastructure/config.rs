use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    #[serde(default)]
    pub subscription: SubscriptionSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub client_id: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SubscriptionSettings {
    pub topic: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogSettings {
    pub path: Option<String>,
    pub directory: Option<String>,
}

/// Where record lines are appended for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stdout,
}

const DEFAULT_LOG_DIRECTORY: &str = "/srvdata/sensor-data";

impl Settings {
    /// Resolve the single topic subscribed to for the process lifetime:
    /// an explicit topic, or the device event channel `<device>/events/rpc`.
    pub fn topic(&self) -> anyhow::Result<String> {
        if let Some(topic) = &self.subscription.topic {
            return Ok(topic.clone());
        }
        if let Some(device) = &self.subscription.device {
            return Ok(format!("{}/events/rpc", device));
        }
        anyhow::bail!("either subscription.topic or subscription.device must be configured")
    }

    /// Resolve the log destination: an explicit path, else a per-device file
    /// under the data directory, else stdout.
    pub fn log_destination(&self) -> LogDestination {
        if let Some(path) = &self.log.path {
            return LogDestination::File(PathBuf::from(path));
        }
        if let Some(device) = &self.subscription.device {
            let directory = self.log.directory.as_deref().unwrap_or(DEFAULT_LOG_DIRECTORY);
            return LogDestination::File(PathBuf::from(format!("{}/{}.data", directory, device)));
        }
        LogDestination::Stdout
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .set_default("broker.host", "10.0.0.4")?
        .set_default("broker.port", 1883)?
        .set_default("broker.connect_timeout_secs", 10)?
        .set_default("broker.client_id", "shelly-telemetry")?
        .add_source(config::File::with_name("config/shelly").required(false))
        .add_source(config::Environment::with_prefix("SHELLY").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(topic: Option<&str>, device: Option<&str>) -> Settings {
        Settings {
            broker: BrokerSettings {
                host: "10.0.0.4".to_string(),
                port: 1883,
                connect_timeout_secs: 10,
                client_id: "shelly-telemetry".to_string(),
            },
            subscription: SubscriptionSettings {
                topic: topic.map(str::to_string),
                device: device.map(str::to_string),
            },
            log: LogSettings::default(),
        }
    }

    #[test]
    fn test_explicit_topic_wins() {
        let settings = settings(Some("some/topic"), Some("shellyht-kitchen"));
        assert_eq!(settings.topic().unwrap(), "some/topic");
    }

    #[test]
    fn test_topic_derived_from_device() {
        let settings = settings(None, Some("shellyht-kitchen"));
        assert_eq!(settings.topic().unwrap(), "shellyht-kitchen/events/rpc");
    }

    #[test]
    fn test_topic_requires_topic_or_device() {
        let settings = settings(None, None);
        assert!(settings.topic().is_err());
    }

    #[test]
    fn test_log_destination_prefers_explicit_path() {
        let mut settings = settings(None, Some("shellyht-kitchen"));
        settings.log.path = Some("/tmp/sensor.log".to_string());
        assert_eq!(
            settings.log_destination(),
            LogDestination::File(PathBuf::from("/tmp/sensor.log"))
        );
    }

    #[test]
    fn test_log_destination_derived_from_device() {
        let settings = settings(None, Some("shellyht-kitchen"));
        assert_eq!(
            settings.log_destination(),
            LogDestination::File(PathBuf::from("/srvdata/sensor-data/shellyht-kitchen.data"))
        );
    }

    #[test]
    fn test_log_destination_falls_back_to_stdout() {
        let settings = settings(Some("some/topic"), None);
        assert_eq!(settings.log_destination(), LogDestination::Stdout);
    }
}
