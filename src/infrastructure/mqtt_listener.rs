// MQTT ingestion loop - Subscription lifecycle and reconnect policy
use crate::application::ingest_service::IngestService;
use crate::infrastructure::config::BrokerSettings;
use anyhow::Context;
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use std::time::Duration;

/// Bounded exponential delay between reconnect attempts: 1s doubling to a
/// 60s ceiling, reset to 1s once a connection is established.
pub struct Backoff {
    current: Duration,
}

impl Backoff {
    const INITIAL: Duration = Duration::from_secs(1);
    const MAX: Duration = Duration::from_secs(60);

    pub fn new() -> Self {
        Self { current: Self::INITIAL }
    }

    /// The delay to sleep before the next attempt. Doubles the stored delay
    /// for the attempt after that, up to the ceiling.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(Self::MAX);
        delay
    }

    pub fn reset(&mut self) {
        self.current = Self::INITIAL;
    }
}

pub struct MqttListener {
    broker: BrokerSettings,
    topic: String,
}

impl MqttListener {
    pub fn new(broker: BrokerSettings, topic: String) -> Self {
        Self { broker, topic }
    }

    /// Poll the broker forever, dispatching each inbound payload to the
    /// ingest service. Transport errors are absorbed here with backoff and
    /// never reach the message-processing path; only a sink write failure
    /// makes this return.
    pub async fn run(self, mut service: IngestService) -> anyhow::Result<()> {
        let options = MqttOptions::new(
            self.broker.client_id.clone(),
            self.broker.host.clone(),
            self.broker.port,
        );

        let (client, mut eventloop) = AsyncClient::new(options, 16);
        eventloop
            .network_options
            .set_connection_timeout(self.broker.connect_timeout_secs);

        let mut backoff = Backoff::new();

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Incoming::ConnAck(ack))) => {
                    backoff.reset();
                    tracing::info!(
                        "connected to mqtt broker {}:{} ({:?})",
                        self.broker.host,
                        self.broker.port,
                        ack.code
                    );
                    // The session is not assumed to survive reconnects, so
                    // the subscription is re-issued on every connect.
                    if let Err(e) = client.subscribe(self.topic.as_str(), QoS::ExactlyOnce).await {
                        tracing::error!("can't subscribe to topic '{}': {}", self.topic, e);
                    }
                }
                Ok(Event::Incoming(Incoming::SubAck(_))) => {
                    tracing::debug!("subscribed to topic '{}'", self.topic);
                }
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    service
                        .handle_payload(&publish.payload)
                        .await
                        .context("log sink write failed")?;
                }
                Ok(_) => {}
                Err(e) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        "mqtt connection error: {}; retrying in {}s",
                        e,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
