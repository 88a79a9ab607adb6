//! Application settings.
//!
//! [`Settings`] is loaded once per invocation, after argument parsing, and
//! passed down by reference. The core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `GREETER__SECTION__KEY`
//! 2. Config file (`--config <FILE>`, else `config.toml` in the platform
//!    config directory when it exists)
//! 3. Built-in defaults

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "GREETER";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub logging: LoggingSettings,
    pub shutdown: ShutdownSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Which sink backs `--out`.
    pub file_mode: FileMode,
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileMode {
    /// Open, append and flush on every message.
    Plain,
    /// Background writer with the default buffer settings.
    #[default]
    Buffered,
    HighThroughput,
    LowLatency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// When set, logs are also appended to `greeter.log` in this directory.
    pub directory: Option<PathBuf>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownSettings {
    /// How long sinks may keep flushing after a termination signal.
    pub grace_period_ms: u64,
}

impl Default for ShutdownSettings {
    fn default() -> Self {
        Self {
            grace_period_ms: 3000,
        }
    }
}

impl ShutdownSettings {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}

impl Settings {
    /// Load settings from defaults, the config file and the environment.
    ///
    /// An explicitly requested file must exist; the default one is optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        Self::load_with(
            config_file,
            Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR),
        )
    }

    fn load_with(config_file: Option<&Path>, env: Environment) -> CliResult<Self> {
        let file = match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                File::from(path).format(FileFormat::Toml).required(true)
            }
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(e),
            })?;

        tracing::debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.greeter.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "greeter", "greeter")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".greeter.toml"))
    }
}
