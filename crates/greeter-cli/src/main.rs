//! # greeter
//!
//! Validates a name, picks a greeting style and delivers the greeting to the
//! console and, with `--out`, a file.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` if present.
//! 2. Screen and parse arguments (help / version exit early).
//! 3. Load settings (defaults, config file, environment).
//! 4. Initialise the tracing subscriber.
//! 5. Compose and deliver the greeting, racing Ctrl-C / SIGTERM.
//! 6. Translate any [`error::CliError`] into one stderr line and an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                      |
//! |------|------------------------------|
//! |  0   | Success                      |
//! |  64  | Usage or rejected argument   |
//! |  65  | Invalid name                 |
//! |  66  | Config file not found        |
//! |  70  | Internal error               |
//! |  74  | Output failed                |
//! |  77  | Output permission denied     |
//! |  78  | Configuration error          |
//! |  130 | Interrupted                  |

use std::{process::ExitCode, sync::Arc};

use greeter_adapters::OsSignal;

use crate::app::App;

mod app;
mod cli;
mod config;
mod error;
mod logging;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    // Non-UTF-8 arguments are converted lossily and then screened like any
    // other input.
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    App::new(Arc::new(OsSignal::new())).run(&args).await.into()
}

// ── tests ─────────────────────────────────────────────────────────────────────
