//! Termination signal adapters.

use async_trait::async_trait;
use tracing::{info, warn};

use greeter_core::application::ports::ShutdownSignal;

/// Resolves on Ctrl-C, and on SIGTERM where the platform has it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSignal;

impl OsSignal {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ShutdownSignal for OsSignal {
    async fn wait(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c() => info!("Received SIGINT"),
                        _ = sigterm.recv() => info!("Received SIGTERM"),
                    }
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {e}");
                    ctrl_c().await;
                    info!("Received SIGINT");
                }
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c().await;
            info!("Received Ctrl-C");
        }
    }
}

/// Wait for Ctrl-C; if the handler can't be installed, never resolve.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
}

/// Never fires. Lets the orchestrator run without touching OS handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSignal;

#[async_trait]
impl ShutdownSignal for NoopSignal {
    async fn wait(&self) {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn noop_signal_never_resolves() {
        let waited = tokio::time::timeout(Duration::from_millis(50), NoopSignal.wait()).await;
        assert!(waited.is_err());
    }
}
