// Sink port for emitted sensor records
use async_trait::async_trait;
use thiserror::Error;

/// The sink has no durability or buffering fallback; a failed write is an
/// operational error the process terminates on.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write record to log sink: {0}")]
    Write(#[from] std::io::Error),
}

#[async_trait]
pub trait RecordSink: Send {
    /// Append one fully assembled record line. Called exactly once per
    /// accepted message; partial records are never handed in.
    async fn append(&mut self, record: &str) -> Result<(), SinkError>;
}
