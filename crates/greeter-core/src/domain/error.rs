// ============================================================================
// domain/error.rs - GREETING RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the orchestrator may report the same error twice: log + stderr)
/// - Categorizable (for exit-code mapping)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (user input)
    // ========================================================================
    #[error("Name cannot be blank")]
    BlankName,

    #[error("Name must be between {min} and {max} characters (got {length})")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Name contains invalid characters: '{value}'")]
    InvalidCharacters { value: String },

    // ========================================================================
    // Policy Violations (business rules)
    // ========================================================================
    #[error("Greeting exceeds {max} characters (got {length})")]
    MessageTooLong { length: usize, max: usize },
}

impl DomainError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName | Self::LengthOutOfRange { .. } | Self::InvalidCharacters { .. } => {
                "name"
            }
            Self::MessageTooLong { .. } => "greeting",
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BlankName => vec![
                "Pass a name as the first positional argument".into(),
                "Omit the name entirely to be greeted anonymously".into(),
            ],
            Self::LengthOutOfRange { max, .. } => {
                vec![format!("Shorten the name to at most {max} characters")]
            }
            Self::InvalidCharacters { .. } => vec![
                "Names may contain letters, spaces, hyphens and apostrophes".into(),
                "Examples: Alice, Mary-Jane, O'Brien".into(),
            ],
            Self::MessageTooLong { .. } => {
                vec!["This greeting template is misconfigured".into()]
            }
        }
    }

    /// Error category for exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BlankName | Self::LengthOutOfRange { .. } | Self::InvalidCharacters { .. } => {
                ErrorCategory::Validation
            }
            Self::MessageTooLong { .. } => ErrorCategory::Policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Policy,
}
