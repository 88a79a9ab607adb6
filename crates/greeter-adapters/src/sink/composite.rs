//! Fan-out adapter.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::info;

use greeter_core::application::{ApplicationError, ApplicationResult, ports::OutputSink};

/// Delivers every message to all child sinks concurrently.
///
/// `send` returns only after every child has finished its attempt. It
/// succeeds only if every child succeeded; otherwise all failures are
/// collected into one [`ApplicationError::Composite`]. Children may complete
/// in any order.
pub struct CompositeSink {
    name: String,
    sinks: Vec<Arc<dyn OutputSink>>,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Arc<dyn OutputSink>>) -> Self {
        let name = format!(
            "composite[{}]",
            sinks.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
        );
        Self { name, sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn aggregate(&self, results: Vec<ApplicationResult<()>>) -> ApplicationResult<()> {
        let total = results.len();
        let errors: Vec<ApplicationError> = results.into_iter().filter_map(Result::err).collect();

        if errors.is_empty() {
            return Ok(());
        }

        for e in &errors {
            info!(sink = %self.name, "Child sink failed: {e}");
        }
        Err(ApplicationError::Composite {
            failed: errors.len(),
            total,
            errors,
        })
    }
}

#[async_trait]
impl OutputSink for CompositeSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> ApplicationResult<()> {
        let results = join_all(self.sinks.iter().map(|s| s.send(message))).await;
        self.aggregate(results)
    }

    async fn shutdown(&self) -> ApplicationResult<()> {
        let results = join_all(self.sinks.iter().map(|s| s.shutdown())).await;
        self.aggregate(results)
    }
}
