//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. Raw argument vectors are screened by [`secure`] before clap
//! ever sees them.

use clap::Parser;

pub mod global;
pub mod output_path;
pub mod secure;

pub use global::GlobalArgs;
pub use secure::{AppConfig, ParseError, ParseOutcome, SecurityError, UsageError, parse_secure};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "greeter",
    bin_name = "greeter",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Greets you, carefully",
    long_about = "greeter validates a name, picks a greeting style for it and \
                  delivers the greeting to the console and optionally a file.",
    after_help = "EXAMPLES:\n\
        \x20 greeter\n\
        \x20 greeter Alice\n\
        \x20 greeter --verbose --out greetings.txt \"Mary Jane\"\n\
        \x20 greeter --out=greetings.txt Bob",
)]
pub struct Cli {
    /// Name to greet. Leading and trailing whitespace is ignored later by
    /// the validator, not here.
    #[arg(value_name = "NAME", help = "Optional name to greet")]
    pub name: Option<String>,

    /// Positionals after the first are accepted and ignored.
    #[arg(value_name = "EXTRA", hide = true)]
    pub extra: Vec<String>,

    /// Also append the greeting to this file.
    #[arg(
        long = "out",
        value_name = "PATH",
        help = "Write greeting to file (also accepts --out=<path>)"
    )]
    pub out: Option<String>,

    /// Flags shared by every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,
}

// ── tests ─────────────────────────────────────────────────────────────────────
