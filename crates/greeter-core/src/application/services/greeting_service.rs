//! Greeting Service - main application orchestrator.
//!
//! This service coordinates the greeting workflow:
//! 1. Validate the name (or fall back to anonymous)
//! 2. Pick a style and render the greeting
//! 3. Deliver it through the configured sink
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::OutputSink,
    domain::{GreetingFormatter, GreetingMessage, GreetingPolicy, NameValidator},
    error::GreeterResult,
};

/// Main greeting service.
pub struct GreetingService {
    sink: Arc<dyn OutputSink>,
}

impl GreetingService {
    /// Create a new greeting service delivering through `sink`.
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self { sink }
    }

    /// Build the greeting for an optional raw name without delivering it.
    ///
    /// Needs no sink, so callers can reject bad input before opening any
    /// output.
    #[instrument(skip_all, fields(provided = raw.is_some()))]
    pub fn compose(raw: Option<&str>) -> GreeterResult<GreetingMessage> {
        let name = NameValidator::validate_or_anonymous(raw).inspect_err(|e| {
            info!(field = e.field(), "Name rejected: {e}");
        })?;

        let style = GreetingPolicy::determine_style(&name);
        debug!(name = %name, style = %style, "Greeting style chosen");

        let message = GreetingFormatter::format(&name, style)?;
        Ok(message)
    }

    /// Deliver an already composed greeting. Attempted once.
    #[instrument(skip_all, fields(style = %message.style()))]
    pub async fn deliver(&self, message: &GreetingMessage) -> GreeterResult<()> {
        self.sink.send(message.as_str()).await?;
        info!("Greeting delivered");
        Ok(())
    }

    /// Compose and deliver in one step.
    pub async fn greet(&self, raw: Option<&str>) -> GreeterResult<GreetingMessage> {
        let message = Self::compose(raw)?;
        self.deliver(&message).await?;
        Ok(message)
    }

    /// Drain and close the underlying sink.
    pub async fn shutdown(&self) -> GreeterResult<()> {
        self.sink.shutdown().await?;
        Ok(())
    }
}
