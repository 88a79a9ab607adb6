//! Application layer errors.
//!
//! These errors represent failures in delivery and orchestration, not
//! business rules. Business rule errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Result type for port implementations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// What kind of I/O failure an output sink hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputErrorKind {
    Io,
    PermissionDenied,
    NotFound,
}

impl From<std::io::ErrorKind> for OutputErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io,
        }
    }
}

/// Errors that occur while delivering a greeting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A single sink failed to write.
    #[error("{sink}: {reason}")]
    Output {
        sink: String,
        reason: String,
        kind: OutputErrorKind,
    },

    /// The sink's queue stayed full for the whole enqueue timeout.
    #[error("{sink}: queue full, message dropped after waiting {timeout_ms}ms")]
    QueueFull { sink: String, timeout_ms: u64 },

    /// The sink has been shut down or its writer task is gone.
    #[error("{sink}: sink is closed")]
    SinkClosed { sink: String },

    /// Several sinks failed during one fan-out.
    #[error("{failed} of {total} sinks failed: {}", itemize(.errors))]
    Composite {
        failed: usize,
        total: usize,
        errors: Vec<ApplicationError>,
    },

    /// A termination signal arrived before delivery finished.
    #[error("Interrupted by termination signal")]
    Interrupted,
}

fn itemize(errors: &[ApplicationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("[{}] {e}", i + 1))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApplicationError {
    /// Build an [`ApplicationError::Output`] from an `io::Error`.
    pub fn io(sink: impl Into<String>, context: &str, err: &std::io::Error) -> Self {
        Self::Output {
            sink: sink.into(),
            reason: format!("{context}: {err}"),
            kind: err.kind().into(),
        }
    }

    /// Whether any leaf of this error is a permission failure.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Output { kind, .. } => *kind == OutputErrorKind::PermissionDenied,
            Self::Composite { errors, .. } => errors.iter().any(Self::is_permission_denied),
            _ => false,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Output { kind, .. } => match kind {
                OutputErrorKind::PermissionDenied => vec![
                    "Check that you have write permissions for the output file".into(),
                ],
                OutputErrorKind::NotFound => vec![
                    "Ensure the output location exists or can be created".into(),
                ],
                OutputErrorKind::Io => vec!["Check available disk space".into()],
            },
            Self::QueueFull { .. } => vec![
                "The output queue is saturated".into(),
                "Try the 'high-throughput' file mode for larger queues".into(),
            ],
            Self::Composite { errors, .. } => {
                errors.iter().flat_map(Self::suggestions).collect()
            }
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Output { .. } | Self::QueueFull { .. } | Self::Composite { .. } => {
                ErrorCategory::Delivery
            }
            Self::SinkClosed { .. } => ErrorCategory::Internal,
            Self::Interrupted => ErrorCategory::Interrupted,
        }
    }
}
