//! Standard output adapter.

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use greeter_core::application::{ApplicationResult, ports::OutputSink};

use super::queue::{BufferConfig, QueuedWriter};

/// Writes each message as a line on standard output.
///
/// Callers only enqueue; a single background task owns the stream, so
/// concurrent senders never interleave partial lines.
pub struct ConsoleSink {
    queue: QueuedWriter,
}

impl ConsoleSink {
    /// Console sink over the process's stdout.
    pub fn stdout() -> Self {
        Self::with_writer(tokio::io::stdout())
    }

    /// Console sink over any writer (used by tests to capture output).
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self {
            queue: QueuedWriter::spawn("console", writer, BufferConfig::console()),
        }
    }
}

#[async_trait]
impl OutputSink for ConsoleSink {
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
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn writes_lines_and_drains_on_shutdown() {
        let (client, mut server) = tokio::io::duplex(4096);
        let sink = ConsoleSink::with_writer(client);

        sink.send("Hey there, Alice! Welcome!").await.unwrap();
        sink.send("Hello World from Anonymous!").await.unwrap();
        sink.shutdown().await.unwrap();

        let mut out = String::new();
        server.read_to_string(&mut out).await.unwrap();
        assert_eq!(
            out,
            format!("Hey there, Alice! Welcome!{LINE_ENDING}Hello World from Anonymous!{LINE_ENDING}")
        );
    }

    #[tokio::test]
    async fn concurrent_senders_produce_whole_lines() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        let sink = std::sync::Arc::new(ConsoleSink::with_writer(client));

        let mut handles = Vec::new();
        for i in 0..20 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                sink.send(&format!("message number {i}")).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        sink.shutdown().await.unwrap();

        let mut out = String::new();
        server.read_to_string(&mut out).await.unwrap();
        let lines: Vec<_> = out.split(LINE_ENDING).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.starts_with("message number ")));
    }

    #[tokio::test]
    async fn name_is_console() {
        let (client, _server) = tokio::io::duplex(64);
        let sink = ConsoleSink::with_writer(client);
        assert_eq!(sink.name(), "console");
        sink.shutdown().await.unwrap();
    }
}
