//! Bounded queue drained by a single background writer task.
//!
//! Shared by [`ConsoleSink`](super::ConsoleSink) and
//! [`BufferedFileSink`](super::BufferedFileSink). The writer task is the only
//! code that ever touches the underlying handle.

use std::{io, time::Duration};

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::{
        Mutex,
        mpsc::{
            self,
            error::{SendTimeoutError, TrySendError},
        },
    },
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, trace};

use greeter_core::application::{ApplicationError, ApplicationResult, OutputErrorKind};

use super::LINE_ENDING;

/// Tuning knobs for a queued writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Flush once this many bytes are buffered.
    pub buffer_size: usize,
    /// Flush at least this often while anything is buffered.
    pub flush_interval: Duration,
    /// Maximum number of messages waiting for the writer.
    pub queue_capacity: usize,
    /// How long `send` waits for room before dropping the message.
    pub enqueue_timeout: Duration,
}

impl BufferConfig {
    /// Large buffer, long interval, deep queue.
    pub const fn high_throughput() -> Self {
        Self {
            buffer_size: 64 * 1024,
            flush_interval: Duration::from_secs(5),
            queue_capacity: 50_000,
            enqueue_timeout: Duration::from_millis(100),
        }
    }

    /// Small buffer, short interval, shallow queue.
    pub const fn low_latency() -> Self {
        Self {
            buffer_size: 1024,
            flush_interval: Duration::from_millis(100),
            queue_capacity: 1_000,
            enqueue_timeout: Duration::from_millis(100),
        }
    }

    /// Settings used for standard output.
    pub const fn console() -> Self {
        Self {
            buffer_size: 8 * 1024,
            flush_interval: Duration::from_millis(100),
            queue_capacity: 1_024,
            enqueue_timeout: Duration::from_millis(100),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8 * 1024,
            flush_interval: Duration::from_secs(1),
            queue_capacity: 10_000,
            enqueue_timeout: Duration::from_millis(100),
        }
    }
}

pub(crate) struct QueuedWriter {
    name: String,
    enqueue_timeout: Duration,
    tx: Mutex<Option<mpsc::Sender<String>>>,
    worker: Mutex<Option<JoinHandle<io::Result<()>>>>,
}

impl QueuedWriter {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub(crate) fn spawn<W>(name: impl Into<String>, writer: W, config: BufferConfig) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let name = name.into();
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let worker = tokio::spawn(drain(name.clone(), rx, writer, config));

        Self {
            name,
            enqueue_timeout: config.enqueue_timeout,
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue without blocking when there is room; otherwise wait up to the
    /// enqueue timeout.
    pub(crate) async fn enqueue(&self, message: &str) -> ApplicationResult<()> {
        let tx = self.tx.lock().await.clone().ok_or_else(|| self.closed())?;

        match tx.try_send(message.to_owned()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(message)) => {
                trace!(sink = %self.name, "Queue full, waiting for room");
                match tx.send_timeout(message, self.enqueue_timeout).await {
                    Ok(()) => Ok(()),
                    Err(SendTimeoutError::Timeout(_)) => {
                        debug!(sink = %self.name, "Queue full, message dropped");
                        Err(ApplicationError::QueueFull {
                            sink: self.name.clone(),
                            timeout_ms: millis(self.enqueue_timeout),
                        })
                    }
                    Err(SendTimeoutError::Closed(_)) => Err(self.writer_failure().await),
                }
            }
            Err(TrySendError::Closed(_)) => Err(self.writer_failure().await),
        }
    }

    /// Close the queue and wait for the writer to drain and flush it.
    pub(crate) async fn close(&self) -> ApplicationResult<()> {
        drop(self.tx.lock().await.take());

        let Some(worker) = self.worker.lock().await.take() else {
            return Ok(());
        };

        match worker.await {
            Ok(Ok(())) => {
                debug!(sink = %self.name, "Writer drained");
                Ok(())
            }
            Ok(Err(e)) => Err(ApplicationError::io(&self.name, "flush on shutdown", &e)),
            Err(e) => Err(ApplicationError::Output {
                sink: self.name.clone(),
                reason: format!("writer task failed: {e}"),
                kind: OutputErrorKind::Io,
            }),
        }
    }

    /// The writer stopped early; surface its I/O error if it had one.
    async fn writer_failure(&self) -> ApplicationError {
        let Some(worker) = self.worker.lock().await.take() else {
            return self.closed();
        };

        match worker.await {
            Ok(Err(e)) => ApplicationError::io(&self.name, "write", &e),
            _ => self.closed(),
        }
    }

    fn closed(&self) -> ApplicationError {
        ApplicationError::SinkClosed {
            sink: self.name.clone(),
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

async fn drain<W>(
    name: String,
    mut rx: mpsc::Receiver<String>,
    mut writer: W,
    config: BufferConfig,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(config.buffer_size);
    // First tick one full interval out, not immediately.
    let mut ticker = tokio::time::interval_at(
        Instant::now() + config.flush_interval,
        config.flush_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(line) => {
                    buf.extend_from_slice(line.as_bytes());
                    buf.extend_from_slice(LINE_ENDING.as_bytes());
                    if buf.len() >= config.buffer_size {
                        trace!(sink = %name, bytes = buf.len(), "Size-triggered flush");
                        flush(&mut writer, &mut buf).await?;
                    }
                }
                None => break,
            },
            _ = ticker.tick() => {
                if !buf.is_empty() {
                    trace!(sink = %name, bytes = buf.len(), "Interval-triggered flush");
                    flush(&mut writer, &mut buf).await?;
                }
            }
        }
    }

    // Queue closed: everything received is in `buf`.
    flush(&mut writer, &mut buf).await
}

async fn flush<W>(writer: &mut W, buf: &mut Vec<u8>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if !buf.is_empty() {
        writer.write_all(buf).await?;
        buf.clear();
    }
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn lines(raw: &str) -> Vec<&str> {
        raw.split(LINE_ENDING).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn presets_match_documented_values() {
        let ht = BufferConfig::high_throughput();
        assert_eq!(ht.buffer_size, 64 * 1024);
        assert_eq!(ht.flush_interval, Duration::from_secs(5));
        assert_eq!(ht.queue_capacity, 50_000);

        let ll = BufferConfig::low_latency();
        assert_eq!(ll.buffer_size, 1024);
        assert_eq!(ll.flush_interval, Duration::from_millis(100));
        assert_eq!(ll.queue_capacity, 1_000);

        assert_eq!(BufferConfig::default().queue_capacity, 10_000);
        assert_eq!(BufferConfig::console().buffer_size, 8 * 1024);
    }

    #[tokio::test]
    async fn close_drains_everything_in_order() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        let writer = QueuedWriter::spawn("test", client, BufferConfig::high_throughput());

        for i in 0..100 {
            writer.enqueue(&format!("line {i}")).await.unwrap();
        }
        writer.close().await.unwrap();

        let mut out = String::new();
        server.read_to_string(&mut out).await.unwrap();
        let got = lines(&out);
        assert_eq!(got.len(), 100);
        assert_eq!(got[0], "line 0");
        assert_eq!(got[99], "line 99");
    }

    #[tokio::test]
    async fn interval_flush_delivers_before_close() {
        let (client, mut server) = tokio::io::duplex(1024);
        let config = BufferConfig {
            flush_interval: Duration::from_millis(20),
            ..BufferConfig::high_throughput()
        };
        let writer = QueuedWriter::spawn("test", client, config);

        writer.enqueue("early").await.unwrap();

        let mut buf = vec![0u8; "early".len()];
        tokio::time::timeout(Duration::from_secs(2), server.read_exact(&mut buf))
            .await
            .expect("interval flush should happen well before the timeout")
            .unwrap();
        assert_eq!(&buf, b"early");

        writer.close().await.unwrap();
    }

    #[tokio::test]
    async fn size_threshold_flushes_without_waiting_for_interval() {
        let (client, mut server) = tokio::io::duplex(1024);
        let config = BufferConfig {
            buffer_size: 4,
            flush_interval: Duration::from_secs(3600),
            ..BufferConfig::default()
        };
        let writer = QueuedWriter::spawn("test", client, config);

        writer.enqueue("abcdef").await.unwrap();

        let mut buf = vec![0u8; 6];
        tokio::time::timeout(Duration::from_secs(2), server.read_exact(&mut buf))
            .await
            .expect("size-triggered flush")
            .unwrap();
        assert_eq!(&buf, b"abcdef");

        writer.close().await.unwrap();
    }

    #[tokio::test]
    async fn first_message_waits_for_a_trigger() {
        let (client, mut server) = tokio::io::duplex(1024);
        let config = BufferConfig {
            flush_interval: Duration::from_secs(3600),
            ..BufferConfig::high_throughput()
        };
        let writer = QueuedWriter::spawn("test", client, config);

        writer.enqueue("x").await.unwrap();

        let mut buf = [0u8; 1];
        let early = tokio::time::timeout(Duration::from_millis(100), server.read(&mut buf)).await;
        assert!(early.is_err(), "flushed before size or interval trigger");

        writer.close().await.unwrap();
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"x");
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn enqueue_after_close_is_rejected() {
        let (client, _server) = tokio::io::duplex(1024);
        let writer = QueuedWriter::spawn("test", client, BufferConfig::low_latency());
        writer.close().await.unwrap();

        let err = writer.enqueue("late").await.unwrap_err();
        assert!(matches!(err, ApplicationError::SinkClosed { .. }));
        // Closing twice is harmless.
        writer.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_queue_times_out_and_drops() {
        // A 1-byte pipe that nobody reads blocks the writer after its first
        // flush, so the single queue slot stays occupied.
        let (client, _server) = tokio::io::duplex(1);
        let config = BufferConfig {
            buffer_size: 1,
            flush_interval: Duration::from_secs(3600),
            queue_capacity: 1,
            enqueue_timeout: Duration::from_millis(50),
        };
        let writer = QueuedWriter::spawn("stuck", client, config);

        let mut saw_full = false;
        for i in 0..10 {
            match writer.enqueue(&format!("message {i}")).await {
                Ok(()) => {}
                Err(ApplicationError::QueueFull { sink, timeout_ms }) => {
                    assert_eq!(sink, "stuck");
                    assert_eq!(timeout_ms, 50);
                    saw_full = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(saw_full);
    }
}
