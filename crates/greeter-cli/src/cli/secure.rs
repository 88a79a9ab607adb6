//! Hardened argument parsing.
//!
//! Every raw argument is screened for size and dangerous content before clap
//! parses it, and the `--out` value is validated afterwards. Nothing here
//! executes or expands anything; rejected input is only reported.

use std::path::PathBuf;

use clap::{
    Parser,
    error::{ContextKind, ContextValue, ErrorKind},
};
use thiserror::Error;
use tracing::debug;

use super::{
    Cli,
    output_path::{OutputPathError, validate_output_path},
};

/// Upper bound on the number of arguments (program name excluded).
pub const MAX_ARGUMENTS: usize = 100;

/// Upper bound on a single argument, in bytes.
pub const MAX_ARGUMENT_LENGTH: usize = 1024;

/// Substrings that are never accepted in any argument, with what they would
/// do in a shell.
const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    ("..", "path traversal"),
    ("~", "home directory expansion"),
    ("$", "variable expansion"),
    ("`", "command substitution"),
    (";", "command separator"),
    ("&", "command separator"),
    ("|", "pipe"),
    (">", "redirect"),
    ("<", "redirect"),
    ("\n", "line injection"),
    ("\r", "line injection"),
];

/// Configuration for one invocation, read-only once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub verbose: bool,
    pub quiet: bool,
    pub no_color: bool,
    pub output_path: Option<PathBuf>,
    /// First positional argument, untrimmed.
    pub name: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Run(AppConfig),
    /// `--help` / `-h`: print this text and exit successfully.
    Help(String),
    /// `--version`: print this text and exit successfully.
    Version(String),
}

/// Input that was refused because it looks like an attack or abuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("too many arguments: {count} (max {max})")]
    TooManyArguments { count: usize, max: usize },

    #[error("argument {index} is {length} bytes long (max {max})")]
    ExcessiveLength {
        index: usize,
        length: usize,
        max: usize,
    },

    #[error("argument {index} contains {description} characters ({pattern})")]
    DangerousCharacters {
        index: usize,
        pattern: String,
        description: &'static str,
    },

    #[error("argument {index} contains a null byte")]
    NullByte { index: usize },
}

/// Input that is well-behaved but not a valid invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("unknown option '{option}'")]
    UnknownOption { option: String },

    #[error("invalid output path '{path}': {reason}")]
    InvalidOutputPath {
        path: String,
        #[source]
        reason: OutputPathError,
    },

    #[error("{message}")]
    Malformed { message: String },
}

/// Either kind of parse failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Parse raw arguments (program name excluded).
pub fn parse_secure(args: &[String]) -> Result<ParseOutcome, ParseError> {
    screen(args)?;

    let argv = std::iter::once("greeter".to_owned()).chain(args.iter().cloned());
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => return interpret_clap_error(e),
    };

    if !cli.extra.is_empty() {
        debug!(count = cli.extra.len(), "Extra positional arguments ignored");
    }

    let output_path = cli
        .out
        .as_deref()
        .map(|raw| {
            validate_output_path(raw).map_err(|reason| UsageError::InvalidOutputPath {
                path: raw.escape_debug().to_string(),
                reason,
            })
        })
        .transpose()?;

    Ok(ParseOutcome::Run(AppConfig {
        verbose: cli.global.verbose,
        quiet: cli.global.quiet,
        no_color: cli.global.no_color,
        output_path,
        name: cli.name,
        config_file: cli.global.config,
    }))
}

/// Count, size and content checks on the raw vector.
fn screen(args: &[String]) -> Result<(), SecurityError> {
    if args.len() > MAX_ARGUMENTS {
        return Err(SecurityError::TooManyArguments {
            count: args.len(),
            max: MAX_ARGUMENTS,
        });
    }

    for (index, arg) in args.iter().enumerate() {
        if arg.contains('\0') {
            return Err(SecurityError::NullByte { index });
        }

        if arg.len() > MAX_ARGUMENT_LENGTH {
            return Err(SecurityError::ExcessiveLength {
                index,
                length: arg.len(),
                max: MAX_ARGUMENT_LENGTH,
            });
        }

        if let Some((pattern, description)) = DANGEROUS_PATTERNS
            .iter()
            .copied()
            .find(|(pattern, _)| arg.contains(pattern))
        {
            return Err(SecurityError::DangerousCharacters {
                index,
                pattern: pattern.escape_debug().to_string(),
                description,
            });
        }
    }

    Ok(())
}

fn interpret_clap_error(e: clap::Error) -> Result<ParseOutcome, ParseError> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(ParseOutcome::Help(e.render().to_string()))
        }
        ErrorKind::DisplayVersion => Ok(ParseOutcome::Version(e.render().to_string())),
        ErrorKind::UnknownArgument => {
            let option = match e.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(s)) => s.clone(),
                _ => "<unknown>".to_owned(),
            };
            Err(UsageError::UnknownOption { option }.into())
        }
        _ => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_owned();
            Err(UsageError::Malformed { message }.into())
        }
    }
}
