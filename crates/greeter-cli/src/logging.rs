//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `greeter-core`
//! and `greeter-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)     | stderr | log file |
//! |-------------|--------|----------|
//! | (none)      | WARN   | INFO     |
//! | `--verbose` | WARN   | DEBUG    |
//! | `--quiet`   | ERROR  | ERROR    |
//!
//! `--verbose` never adds stderr lines; a failed run shows exactly one.
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingSettings};

const LOG_FILE_NAME: &str = "greeter.log";

/// Initialise the global tracing subscriber.
///
/// Must be called at most once per process. When a log directory is
/// configured the returned guard must be held until exit, or buffered
/// file lines are lost.
pub fn init_logging(
    quiet: bool,
    verbose: bool,
    settings: &LoggingSettings,
    no_color: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let use_ansi = !no_color && std::io::stderr().is_terminal();

    let stderr_layer = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    }
    .with_filter(filter(stderr_level(quiet)));

    let (file_layer, guard) = match &settings.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter(file_level(quiet, verbose)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(guard)
}

/// `RUST_LOG` when set, else `level` for every greeter crate.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "greeter={level},greeter_cli={level},greeter_core={level},greeter_adapters={level}"
        ))
    })
}

fn stderr_level(quiet: bool) -> &'static str {
    if quiet { "error" } else { "warn" }
}

fn file_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}
