//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `greeter-adapters` crate provides implementations.

use async_trait::async_trait;

use crate::application::error::ApplicationResult;

/// Port for delivering a finished greeting.
///
/// Implemented by:
/// - `greeter_adapters::sink::ConsoleSink` (queued stdout)
/// - `greeter_adapters::sink::FileSink` (one append per call)
/// - `greeter_adapters::sink::BufferedFileSink` (single background writer)
/// - `greeter_adapters::sink::CompositeSink` (concurrent fan-out)
/// - `greeter_adapters::sink::MemorySink` (testing)
///
/// ## Design Notes
///
/// - `send` is attempted once; sinks never retry
/// - `shutdown` must drain anything `send` accepted before returning
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Label used in diagnostics, e.g. `console` or `file:/tmp/out.txt`.
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn send(&self, message: &str) -> ApplicationResult<()>;

    /// Flush pending work and release resources.
    async fn shutdown(&self) -> ApplicationResult<()> {
        Ok(())
    }
}

/// Port for termination requests (SIGINT, SIGTERM, Ctrl-C).
///
/// Implemented by:
/// - `greeter_adapters::signal::OsSignal` (production)
/// - `greeter_adapters::signal::NoopSignal` (testing, never fires)
#[async_trait]
pub trait ShutdownSignal: Send + Sync {
    /// Resolves once a termination request has been observed.
    async fn wait(&self);
}
