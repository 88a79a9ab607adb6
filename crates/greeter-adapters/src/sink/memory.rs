//! In-memory sink for testing.

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use greeter_core::application::{
    ApplicationError, ApplicationResult, OutputErrorKind, ports::OutputSink,
};

/// Records messages instead of writing them anywhere.
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    messages: Mutex<Vec<String>>,
    failure: Option<String>,
    shut_down: AtomicBool,
}

impl MemorySink {
    /// A sink that accepts everything.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Mutex::new(Vec::new()),
            failure: None,
            shut_down: AtomicBool::new(false),
        }
    }

    /// A sink whose every `send` fails with `reason`.
    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(name)
        }
    }

    /// Messages received so far (testing helper).
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> ApplicationResult<()> {
        if let Some(reason) = &self.failure {
            return Err(ApplicationError::Output {
                sink: self.name.clone(),
                reason: reason.clone(),
                kind: OutputErrorKind::Io,
            });
        }
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
        Ok(())
    }

    async fn shutdown(&self) -> ApplicationResult<()> {
        self.shut_down.store(true, Ordering::SeqCst);
        Ok(())
    }
}
