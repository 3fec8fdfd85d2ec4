// Ingest service - Notification filter and record builder
use crate::application::record_sink::{RecordSink, SinkError};
use crate::domain::document::locate;
use crate::domain::field::{encode, SENSOR_FIELDS};
use serde_json::Value;

const METHOD_KEY: &str = "method";
// A device subscribed on "<device>/events/rpc" sends several notification
// shapes; only NotifyFullStatus carries all the sensor fields of interest.
// The check is a prefix compare, so a method whose first 16 characters match
// is accepted even if longer.
const FULL_STATUS_PREFIX: &str = "NotifyFullStatus";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

pub struct IngestService {
    sink: Box<dyn RecordSink>,
}

impl IngestService {
    pub fn new(sink: Box<dyn RecordSink>) -> Self {
        Self { sink }
    }

    /// Process one inbound payload to completion: parse, filter, and on
    /// accept write exactly one record line. Unparseable and filtered
    /// payloads are dropped without error; only a sink failure propagates.
    pub async fn handle_payload(&mut self, payload: &[u8]) -> Result<(), SinkError> {
        tracing::trace!("payload: {}", String::from_utf8_lossy(payload));

        let document: Value = match serde_json::from_slice(payload) {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!("discarding unparseable payload: {}", e);
                return Ok(());
            }
        };

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let Some(record) = build_record(&document, &timestamp) else {
            return Ok(());
        };

        self.sink.append(&record).await
    }
}

/// Build the record line for a full-status notification, or `None` if the
/// document is some other notification shape.
///
/// The record always carries all five fields in fixed order; a field that is
/// missing or of the wrong type renders as "NaN" rather than being omitted.
pub fn build_record(document: &Value, timestamp: &str) -> Option<String> {
    let method = locate(document, METHOD_KEY)?.as_str()?;
    if !method.starts_with(FULL_STATUS_PREFIX) {
        return None;
    }

    let mut line = String::from(timestamp);
    for field in &SENSOR_FIELDS {
        let value = locate(document, field.key);
        line.push_str(&format!(" {}:{}", field.label, encode(value, field.semantic)));
    }
    line.push('\n');

    Some(line)
}
