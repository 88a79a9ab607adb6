//! Flags that shape how output is produced rather than what is greeted.
//!
//! Declared here and flattened into [`super::Cli`].

use clap::{Args, builder::FalseyValueParser};
use std::path::PathBuf;

/// Global arguments.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Print a confirmation line once the greeting is delivered and raise
    /// the log file level to DEBUG.
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Enable informational confirmation output"
    )]
    pub verbose: bool,

    /// Suppress non-essential output. Independent of `--verbose`; when both
    /// are given the confirmation line is suppressed.
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    /// Any non-empty value other than a falsey word (`0`, `false`, `no`,
    /// `off`) counts as set.
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
