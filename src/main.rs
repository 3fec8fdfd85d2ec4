// Main entry point - Dependency injection and ingestion setup
mod application;
mod domain;
mod infrastructure;

use crate::application::ingest_service::IngestService;
use crate::application::record_sink::RecordSink;
use crate::infrastructure::config::{load_settings, LogDestination};
use crate::infrastructure::file_sink::{FileSink, StdoutSink};
use crate::infrastructure::mqtt_listener::MqttListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let settings = load_settings()?;
    let topic = settings.topic()?;

    // Open the log sink once, before the ingestion loop starts
    let sink: Box<dyn RecordSink> = match settings.log_destination() {
        LogDestination::File(path) => {
            tracing::info!("logging to {}", path.display());
            Box::new(FileSink::open(&path).await?)
        }
        LogDestination::Stdout => {
            tracing::info!("logging to stdout");
            Box::new(StdoutSink::new())
        }
    };

    println!(
        "Starting shelly-telemetry on broker {}:{}, topic '{}'",
        settings.broker.host, settings.broker.port, topic
    );

    // Wire the service and the transport
    let service = IngestService::new(sink);
    let listener = MqttListener::new(settings.broker.clone(), topic);

    listener.run(service).await
}
