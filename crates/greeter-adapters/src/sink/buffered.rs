//! Buffered file adapter: single background writer per file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tracing::info;

use greeter_core::application::{ApplicationError, ApplicationResult, ports::OutputSink};

use super::{
    file::ensure_parent,
    queue::{BufferConfig, QueuedWriter, millis},
};

/// Queues messages in memory and appends them to a file in batches.
///
/// The file handle is owned by one background task; `send` only enqueues.
/// A batch is written when `buffer_size` bytes accumulate or
/// `flush_interval` elapses, whichever comes first. [`OutputSink::shutdown`]
/// drains the queue and flushes before the file is closed.
pub struct BufferedFileSink {
    path: PathBuf,
    config: BufferConfig,
    queue: QueuedWriter,
}

impl BufferedFileSink {
    /// Open (or create) `path` for appending and start the writer task.
    pub async fn open(path: impl Into<PathBuf>, config: BufferConfig) -> ApplicationResult<Self> {
        let path = path.into();
        let name = format!("buffered-file:{}", path.display());

        ensure_parent(&name, &path).await?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| ApplicationError::io(&name, "open", &e))?;

        info!(
            path = %path.display(),
            buffer_size = config.buffer_size,
            flush_interval_ms = millis(config.flush_interval),
            queue_capacity = config.queue_capacity,
            "Buffered file sink opened"
        );

        Ok(Self {
            path,
            config,
            queue: QueuedWriter::spawn(name, file, config),
        })
    }

    /// Preset tuned for bulk writes.
    pub async fn high_throughput(path: impl Into<PathBuf>) -> ApplicationResult<Self> {
        Self::open(path, BufferConfig::high_throughput()).await
    }

    /// Preset tuned for prompt visibility.
    pub async fn low_latency(path: impl Into<PathBuf>) -> ApplicationResult<Self> {
        Self::open(path, BufferConfig::low_latency()).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }
}

#[async_trait]
impl OutputSink for BufferedFileSink {
    fn name(&self) -> &str {
        self.queue.name()
    }

    async fn send(&self, message: &str) -> ApplicationResult<()> {
        self.queue.enqueue(message).await
    }

    async fn shutdown(&self) -> ApplicationResult<()> {
        self.queue.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::LINE_ENDING;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn shutdown_flushes_everything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let sink = BufferedFileSink::high_throughput(&path).await.unwrap();

        for i in 0..500 {
            sink.send(&format!("greeting {i}")).await.unwrap();
        }
        sink.shutdown().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.split(LINE_ENDING).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 500);
        assert_eq!(lines[0], "greeting 0");
        assert_eq!(lines[499], "greeting 499");
    }

    #[tokio::test]
    async fn nothing_is_written_before_a_flush_trigger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lazy.txt");
        let sink = BufferedFileSink::high_throughput(&path).await.unwrap();

        sink.send("pending").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        sink.shutdown().await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("pending{LINE_ENDING}")
        );
    }

    #[tokio::test]
    async fn low_latency_flushes_on_interval() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fast.txt");
        let sink = BufferedFileSink::low_latency(&path).await.unwrap();

        sink.send("soon").await.unwrap();

        let mut flushed = false;
        for _ in 0..40 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if std::fs::read_to_string(&path).unwrap().contains("soon") {
                flushed = true;
                break;
            }
        }
        assert!(flushed, "low-latency preset should flush within its interval");
        sink.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_parent_and_reports_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("er").join("file.txt");
        let sink = BufferedFileSink::open(&path, BufferConfig::default())
            .await
            .unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert!(sink.name().starts_with("buffered-file:"));
        assert_eq!(sink.config(), &BufferConfig::default());
        sink.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn send_after_shutdown_fails() {
        let dir = TempDir::new().unwrap();
        let sink = BufferedFileSink::low_latency(dir.path().join("x.txt"))
            .await
            .unwrap();
        sink.shutdown().await.unwrap();

        assert!(matches!(
            sink.send("late").await,
            Err(ApplicationError::SinkClosed { .. })
        ));
    }
}
