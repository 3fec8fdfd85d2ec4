// Append-only log sink adapters
use crate::application::record_sink::{RecordSink, SinkError};
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, Stdout};

/// Sink that appends records to a data file. The file is opened once before
/// the ingestion loop starts and the process owns its offset from then on.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(Self { file })
    }
}

#[async_trait]
impl RecordSink for FileSink {
    async fn append(&mut self, record: &str) -> Result<(), SinkError> {
        self.file.write_all(record.as_bytes()).await?;
        // One record, one write; nothing is buffered across messages.
        self.file.flush().await?;
        Ok(())
    }
}

/// Sink that writes records to standard output.
pub struct StdoutSink {
    stdout: Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { stdout: tokio::io::stdout() }
    }
}

#[async_trait]
impl RecordSink for StdoutSink {
    async fn append(&mut self, record: &str) -> Result<(), SinkError> {
        self.stdout.write_all(record.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_sink_appends_across_opens() {
        let dir = std::env::temp_dir().join("shelly-telemetry-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("sink.data");
        let _ = tokio::fs::remove_file(&path).await;

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("first line\n").await.unwrap();
        drop(sink);

        let mut sink = FileSink::open(&path).await.unwrap();
        sink.append("second line\n").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "first line\nsecond line\n");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_file_sink_open_fails_for_missing_directory() {
        let path = Path::new("/nonexistent-directory/sink.data");
        assert!(FileSink::open(path).await.is_err());
    }
}
