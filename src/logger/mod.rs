//! Logging based on `tracing-subscriber`
//!
//! - Console output on stderr, colored only when attached to a terminal
//! - Optional file output in full, compact or JSON format
//!
//! stdout is left to command output so results can be piped.

pub mod config;
pub mod error;
pub(crate) mod writer;


pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber described by `config`.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    // RUST_LOG directives refine the configured level.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    // File layer goes first so console ANSI settings don't leak into the file.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file_layer = match &config.file {
        Some(file) => {
            let writer = writer::open_log_file(file)?;
            let layer = match file.format {
                LogFormat::Full => fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer)
                    .boxed(),
                LogFormat::Compact => fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer)
                    .boxed(),
                LogFormat::Json => fmt::layer()
                    .with_ansi(false)
                    .json()
                    .with_writer(writer)
                    .boxed(),
            };
            Some(layer)
        }
        None => None,
    };

    let console_layer = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stderr().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized {
            message: e.to_string(),
        })?;

    Ok(())
}
