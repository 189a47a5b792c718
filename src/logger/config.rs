//! Runtime logger configuration, resolved from `[logger]` settings.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use tracing::Level;

/// What [`init_logger`](super::init_logger) installs.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: Level,
    pub console: ConsoleConfig,
    /// `None` keeps logs off disk.
    pub file: Option<FileConfig>,
}

impl LoggerConfig {
    /// Build from the textual level used in config files (case-insensitive).
    pub fn new(level: &str, console: ConsoleConfig, file: Option<FileConfig>) -> Result<Self> {
        let config = Self {
            level: parse_level(level)?,
            console,
            file,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.console.enabled && self.file.is_none() {
            bail!("At least one output (console or file) must be enabled");
        }
        if let Some(file) = &self.file {
            file.validate()?;
        }
        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            console: ConsoleConfig::default(),
            file: None,
        }
    }
}

pub fn parse_level(value: &str) -> Result<Level> {
    Level::from_str(value.trim()).map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
            value
        )
    })
}

/// Console logs always go to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Honoured only when stderr is a terminal.
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfig {
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    /// The parent directory is created later, when the writer opens the file.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            bail!("File path cannot be empty when file output is enabled");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "full" => LogFormat::Full,
            "compact" => LogFormat::Compact,
            "json" => LogFormat::Json,
            other => bail!("Unknown log format '{}', expected full, compact or json", other),
        })
    }
}
