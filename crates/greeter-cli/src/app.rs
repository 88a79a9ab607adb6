//! The orchestrator: one invocation from raw arguments to an exit status.
//!
//! ```text
//! ParseArgs → ValidateName → FormatGreeting → Deliver → MapExit
//! ```
//!
//! Every failure stops the pipeline and is reported once, on stderr, by
//! [`App::run`]. Nothing is retried.

use std::{path::Path, sync::Arc};

use tracing::{debug, info, instrument};

use greeter_adapters::{BufferConfig, BufferedFileSink, CompositeSink, ConsoleSink, FileSink};
use greeter_core::{
    application::{
        ApplicationError, ApplicationResult, GreetingService,
        ports::{OutputSink, ShutdownSignal},
    },
    error::{GreeterError, GreeterResult},
};

use crate::{
    cli::{AppConfig, ParseOutcome, parse_secure},
    config::{FileMode, Settings},
    error::{CliError, CliResult, ExitStatus},
    logging::init_logging,
    output::OutputManager,
};

/// Sinks for one invocation.
struct Sinks {
    sink: Arc<dyn OutputSink>,
    total: usize,
    /// A file sink that could not be opened. The console still gets the
    /// greeting; the failure is reported afterwards.
    unopened: Option<ApplicationError>,
}

pub struct App {
    signal: Arc<dyn ShutdownSignal>,
    console: Option<Arc<dyn OutputSink>>,
    install_logging: bool,
}

impl App {
    pub fn new(signal: Arc<dyn ShutdownSignal>) -> Self {
        Self {
            signal,
            console: None,
            install_logging: true,
        }
    }

    /// Use `console` instead of stdout for the greeting.
    pub fn with_console(mut self, console: Arc<dyn OutputSink>) -> Self {
        self.console = Some(console);
        self
    }

    /// Skip installing the global tracing subscriber.
    pub fn without_logging(mut self) -> Self {
        self.install_logging = false;
        self
    }

    /// Run one invocation. `args` excludes the program name.
    pub async fn run(&self, args: &[String]) -> ExitStatus {
        let config = match parse_secure(args) {
            Ok(ParseOutcome::Run(config)) => config,
            Ok(ParseOutcome::Help(text) | ParseOutcome::Version(text)) => {
                if let Err(e) = OutputManager::new(false, true).raw(&text) {
                    debug!("stdout unavailable: {e}");
                }
                return ExitStatus::Success;
            }
            Err(e) => {
                let no_color = std::env::var_os("NO_COLOR").is_some();
                return report(e.into(), &OutputManager::new(false, no_color));
            }
        };

        let settings = match Settings::load(config.config_file.as_deref()) {
            Ok(settings) => settings,
            Err(e) => return report(e, &OutputManager::new(config.quiet, config.no_color)),
        };

        let no_color = config.no_color || settings.output.no_color;
        let output = OutputManager::new(config.quiet, no_color);

        // Held until the end of `run` so file logs are flushed.
        let _guard = if self.install_logging {
            match init_logging(config.quiet, config.verbose, &settings.logging, no_color) {
                Ok(guard) => guard,
                Err(e) => {
                    let err = CliError::Internal {
                        message: format!("{e:#}"),
                    };
                    return report(err, &output);
                }
            }
        } else {
            None
        };

        debug!(
            verbose = config.verbose,
            quiet = config.quiet,
            out = ?config.output_path,
            file_mode = ?settings.output.file_mode,
            "greeter started"
        );

        match self.greet(&config, &settings).await {
            Ok(delivered) => {
                if config.verbose && !output.is_quiet() {
                    let line = format!("Greeting delivered to {delivered} sink(s)");
                    if let Err(e) = output.print(&line) {
                        debug!("stdout unavailable: {e}");
                    }
                }
                info!("greeter completed successfully");
                ExitStatus::Success
            }
            Err(e) => report(e, &output),
        }
    }

    /// Compose, deliver and drain, racing the termination signal.
    #[instrument(skip_all)]
    async fn greet(&self, config: &AppConfig, settings: &Settings) -> CliResult<usize> {
        // Reject bad input before any sink exists.
        let message = GreetingService::compose(config.name.as_deref())?;

        let sinks = self
            .build_sinks(config.output_path.as_deref(), settings.output.file_mode)
            .await;
        let service = GreetingService::new(sinks.sink);
        let grace = settings.shutdown.grace_period();

        tokio::select! {
            result = async {
                let sent = service.deliver(&message).await;
                // Drain even when the send failed.
                let drained = service.shutdown().await;
                sent.and(drained)
            } => match (result, sinks.unopened) {
                (Ok(()), None) => Ok(sinks.total),
                (Err(e), None) => Err(e.into()),
                (result, Some(unopened)) => Err(with_unopened(result, unopened, sinks.total)),
            },
            () = self.signal.wait() => {
                let grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX);
                info!(grace_ms, "Termination signal, flushing sinks");
                match tokio::time::timeout(grace, service.shutdown()).await {
                    Ok(Ok(())) => debug!("Sinks drained after signal"),
                    Ok(Err(e)) => info!("Flush after signal failed: {e}"),
                    Err(_) => info!("Grace period elapsed before sinks drained"),
                }
                Err(CliError::Interrupted)
            }
        }
    }

    /// Console always; with `--out`, a file sink alongside it.
    async fn build_sinks(&self, out: Option<&Path>, mode: FileMode) -> Sinks {
        let console = match &self.console {
            Some(console) => Arc::clone(console),
            None => Arc::new(ConsoleSink::stdout()) as Arc<dyn OutputSink>,
        };

        let Some(path) = out else {
            return Sinks {
                sink: console,
                total: 1,
                unopened: None,
            };
        };

        match open_file_sink(path, mode).await {
            Ok(file) => {
                info!(sink = file.name(), "File output enabled");
                Sinks {
                    sink: Arc::new(CompositeSink::new(vec![console, file])),
                    total: 2,
                    unopened: None,
                }
            }
            Err(e) => {
                info!("File output unavailable: {e}");
                Sinks {
                    sink: console,
                    total: 2,
                    unopened: Some(e),
                }
            }
        }
    }
}

async fn open_file_sink(path: &Path, mode: FileMode) -> ApplicationResult<Arc<dyn OutputSink>> {
    let sink: Arc<dyn OutputSink> = match mode {
        FileMode::Plain => Arc::new(FileSink::new(path)),
        FileMode::Buffered => Arc::new(BufferedFileSink::open(path, BufferConfig::default()).await?),
        FileMode::HighThroughput => Arc::new(BufferedFileSink::high_throughput(path).await?),
        FileMode::LowLatency => Arc::new(BufferedFileSink::low_latency(path).await?),
    };
    Ok(sink)
}

/// Fold the file sink that never opened into the console's outcome, so
/// every failed sink is reported.
fn with_unopened(result: GreeterResult<()>, unopened: ApplicationError, total: usize) -> CliError {
    let mut errors = match result {
        Ok(()) => Vec::new(),
        Err(GreeterError::Application(ApplicationError::Composite { errors, .. })) => errors,
        Err(GreeterError::Application(e)) => vec![e],
        Err(other) => return other.into(),
    };
    errors.push(unopened);
    ApplicationError::Composite {
        failed: errors.len(),
        total,
        errors,
    }
    .into()
}

/// Log `err`, print its single line and pick the exit status.
fn report(err: CliError, output: &OutputManager) -> ExitStatus {
    err.log();
    if let Err(e) = output.error(&err) {
        debug!("stderr unavailable: {e}");
    }
    err.exit_status()
}
