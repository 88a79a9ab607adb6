//! Error handling for the greeter CLI.
//!
//! Every failure of an invocation ends up as a [`CliError`], which knows:
//! - the single line shown to the user
//! - actionable suggestions (logged, not printed)
//! - the sysexits-style [`ExitStatus`] for the process

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use owo_colors::OwoColorize;
use thiserror::Error;

use greeter_core::{
    application::ApplicationError,
    domain::{DomainError, ErrorCategory as DomainCategory},
    error::{ErrorCategory as CoreCategory, GreeterError},
};

use crate::cli::ParseError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Process exit codes, following `sysexits.h` where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    /// EX_USAGE
    Usage = 64,
    /// EX_DATAERR
    DataErr = 65,
    /// EX_NOINPUT
    NoInput = 66,
    /// EX_SOFTWARE
    Software = 70,
    /// EX_IOERR
    IoErr = 74,
    /// EX_NOPERM
    NoPerm = 77,
    /// EX_CONFIG
    Config = 78,
    /// 128 + SIGINT
    Interrupted = 130,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// All the ways an invocation can fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected or malformed command line.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The name did not pass validation.
    #[error("Invalid input: {field}: {source}")]
    InvalidInput {
        field: &'static str,
        source: DomainError,
    },

    /// The greeting itself broke a formatting rule.
    #[error("Greeting rejected: {source}")]
    Policy { source: DomainError },

    /// At least one sink failed.
    #[error("Failed to deliver greeting: {source}")]
    Delivery { source: ApplicationError },

    /// `--config` pointed at a file that is not there.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// A configuration source could not be read or deserialized.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    /// A termination signal arrived before the greeting was delivered.
    #[error("Interrupted")]
    Interrupted,

    /// Anything that should not happen.
    #[error("Unexpected failure: {message}")]
    Internal { message: String },
}

impl From<GreeterError> for CliError {
    fn from(err: GreeterError) -> Self {
        match err {
            GreeterError::Domain(source) => match source.category() {
                DomainCategory::Validation => Self::InvalidInput {
                    field: source.field(),
                    source,
                },
                DomainCategory::Policy => Self::Policy { source },
            },
            GreeterError::Application(source) => source.into(),
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(source: ApplicationError) -> Self {
        match source {
            ApplicationError::Interrupted => Self::Interrupted,
            source => Self::Delivery { source },
        }
    }
}

impl CliError {
    /// Exit status for this error. Every variant is listed.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Parse(_) => ExitStatus::Usage,
            Self::InvalidInput { .. } => ExitStatus::DataErr,
            Self::Policy { .. } => ExitStatus::Config,
            Self::Delivery { source } => match source.category() {
                CoreCategory::Internal => ExitStatus::Software,
                _ if source.is_permission_denied() => ExitStatus::NoPerm,
                _ => ExitStatus::IoErr,
            },
            Self::ConfigNotFound { .. } => ExitStatus::NoInput,
            Self::ConfigError { .. } => ExitStatus::Config,
            Self::Interrupted => ExitStatus::Interrupted,
            Self::Internal { .. } => ExitStatus::Software,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Parse(ParseError::Security(_)) => vec![
                "Arguments may not contain shell metacharacters or path traversal".into(),
                "Use --help for usage information".into(),
            ],
            Self::Parse(ParseError::Usage(_)) => {
                vec!["Use --help for usage information".into()]
            }
            Self::InvalidInput { source, .. } | Self::Policy { source } => source.suggestions(),
            Self::Delivery { source } => source.suggestions(),
            Self::ConfigNotFound { path } => vec![
                format!("Create {} or drop the --config flag", path.display()),
            ],
            Self::ConfigError { .. } => vec![
                "Check the syntax of your config file".into(),
                "Environment overrides use the form GREETER__SECTION__KEY".into(),
            ],
            Self::Interrupted => vec!["The greeting may not have been written".into()],
            Self::Internal { .. } => vec!["This appears to be a bug in greeter".into()],
        }
    }

    /// The single error line, without ANSI codes.
    pub fn format_plain(&self) -> String {
        match self {
            Self::Parse(_) => format!("error: {self}"),
            _ => self.to_string(),
        }
    }

    /// Same line as [`Self::format_plain`], with colour.
    pub fn format_colored(&self) -> String {
        match self {
            Self::Parse(_) => format!("{} {}", "error:".red().bold(), self),
            _ => self.to_string().red().to_string(),
        }
    }

    /// Log the error and its causes using tracing.
    ///
    /// Logged below WARN so the stderr layer never repeats what
    /// [`Self::format_plain`] already shows; the log file keeps it.
    pub fn log(&self) {
        match self.exit_status() {
            ExitStatus::Software => tracing::info!(internal = true, "Internal error: {}", self),
            status => tracing::info!(code = status.code(), "{}", self),
        }

        let mut source = self.source();
        while let Some(err) = source {
            tracing::debug!("Caused by: {}", err);
            source = err.source();
        }

        for suggestion in self.suggestions() {
            tracing::debug!(suggestion = %suggestion, "hint");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{
        SecurityError, UsageError,
        output_path::OutputPathError,
    };
    use greeter_core::application::OutputErrorKind;

    fn output(kind: OutputErrorKind) -> ApplicationError {
        ApplicationError::Output {
            sink: "file:x.txt".into(),
            reason: "write failed".into(),
            kind,
        }
    }

    // ── exit statuses ─────────────────────────────────────────────────────

    #[test]
    fn exit_status_codes_follow_sysexits() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Usage.code(), 64);
        assert_eq!(ExitStatus::DataErr.code(), 65);
        assert_eq!(ExitStatus::NoInput.code(), 66);
        assert_eq!(ExitStatus::Software.code(), 70);
        assert_eq!(ExitStatus::IoErr.code(), 74);
        assert_eq!(ExitStatus::NoPerm.code(), 77);
        assert_eq!(ExitStatus::Config.code(), 78);
        assert_eq!(ExitStatus::Interrupted.code(), 130);
    }

    #[test]
    fn parse_failures_are_usage_errors() {
        let security: CliError = ParseError::from(SecurityError::NullByte { index: 0 }).into();
        let usage: CliError = ParseError::from(UsageError::InvalidOutputPath {
            path: "CON.txt".into(),
            reason: OutputPathError::ReservedName { name: "CON".into() },
        })
        .into();
        assert_eq!(security.exit_status(), ExitStatus::Usage);
        assert_eq!(usage.exit_status(), ExitStatus::Usage);
    }

    #[test]
    fn validation_is_data_error() {
        let err: CliError = GreeterError::Domain(DomainError::BlankName).into();
        assert!(matches!(err, CliError::InvalidInput { field: "name", .. }));
        assert_eq!(err.exit_status(), ExitStatus::DataErr);
    }

    #[test]
    fn policy_failure_is_config_error() {
        let err: CliError = GreeterError::Domain(DomainError::MessageTooLong {
            length: 250,
            max: 200,
        })
        .into();
        assert!(matches!(err, CliError::Policy { .. }));
        assert_eq!(err.exit_status(), ExitStatus::Config);
    }

    #[test]
    fn delivery_failures_map_by_kind() {
        let io: CliError = output(OutputErrorKind::Io).into();
        let denied: CliError = output(OutputErrorKind::PermissionDenied).into();
        assert_eq!(io.exit_status(), ExitStatus::IoErr);
        assert_eq!(denied.exit_status(), ExitStatus::NoPerm);
    }

    #[test]
    fn permission_denied_inside_composite_is_noperm() {
        let err: CliError = ApplicationError::Composite {
            failed: 1,
            total: 2,
            errors: vec![output(OutputErrorKind::PermissionDenied)],
        }
        .into();
        assert_eq!(err.exit_status(), ExitStatus::NoPerm);
    }

    #[test]
    fn closed_sink_is_a_software_error() {
        let err: CliError = ApplicationError::SinkClosed {
            sink: "console".into(),
        }
        .into();
        assert_eq!(err.exit_status(), ExitStatus::Software);
    }

    #[test]
    fn interrupted_maps_to_130() {
        let err: CliError = GreeterError::Application(ApplicationError::Interrupted).into();
        assert!(matches!(err, CliError::Interrupted));
        assert_eq!(err.exit_status().code(), 130);
    }

    #[test]
    fn config_errors() {
        let missing = CliError::ConfigNotFound {
            path: PathBuf::from("nope.toml"),
        };
        let broken = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert_eq!(missing.exit_status(), ExitStatus::NoInput);
        assert_eq!(broken.exit_status(), ExitStatus::Config);
    }

    // ── messages ──────────────────────────────────────────────────────────

    #[test]
    fn invalid_input_message_names_the_field() {
        let err: CliError = GreeterError::Domain(DomainError::InvalidCharacters {
            value: "Bob1".into(),
        })
        .into();
        assert_eq!(
            err.format_plain(),
            "Invalid input: name: Name contains invalid characters: 'Bob1'"
        );
    }

    #[test]
    fn delivery_message_carries_reason() {
        let err: CliError = output(OutputErrorKind::Io).into();
        assert_eq!(
            err.format_plain(),
            "Failed to deliver greeting: file:x.txt: write failed"
        );
    }

    #[test]
    fn parse_message_is_prefixed() {
        let err: CliError = ParseError::from(UsageError::UnknownOption {
            option: "--shout".into(),
        })
        .into();
        assert_eq!(err.format_plain(), "error: unknown option '--shout'");
    }

    #[test]
    fn messages_are_single_line() {
        let err: CliError = ApplicationError::Composite {
            failed: 2,
            total: 2,
            errors: vec![output(OutputErrorKind::Io), output(OutputErrorKind::NotFound)],
        }
        .into();
        assert!(!err.format_plain().contains('\n'));
        assert!(!err.format_colored().contains('\n'));
    }

    #[test]
    fn every_error_has_suggestions() {
        let errors = [
            CliError::Interrupted,
            CliError::Internal {
                message: "x".into(),
            },
            CliError::ConfigNotFound {
                path: PathBuf::from("a.toml"),
            },
            ParseError::from(SecurityError::TooManyArguments { count: 101, max: 100 }).into(),
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err:?}");
        }
    }
}
