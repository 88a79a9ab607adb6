//! Terminal output for everything that is not the greeting itself.
//!
//! The greeting goes through the console sink; this covers help and version
//! text, the verbose confirmation line, and error lines.

use std::io::{self, IsTerminal};

use console::Term;

use crate::error::CliError;

/// Manages CLI output based on flags and settings.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    pub fn new(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(msg)
    }

    /// Pre-rendered text such as help or version, written as is. Never
    /// suppressed.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        self.stdout.write_str(text)?;
        self.stdout.flush()
    }

    /// Error line on stderr. *Not* suppressed in quiet mode.
    pub fn error(&self, err: &CliError) -> io::Result<()> {
        let line = if self.no_color || !io::stderr().is_terminal() {
            err.format_plain()
        } else {
            err.format_colored()
        };
        self.stderr.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
