//! Errors raised while assembling [`Settings`](super::settings::Settings).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The merged sources do not fit the settings structure.
    #[error("Configuration does not match the expected layout: {0}")]
    Deserialize(#[source] config::ConfigError),

    /// A setting has a value the relay cannot use.
    #[error("Invalid setting {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Unknown environment '{0}', expected development, test or production")]
    UnknownEnvironment(String),

    /// Two ways of locating configuration were given at once.
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    /// Raised by the `config` crate while reading sources.
    #[error("Failed to read configuration sources: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflicting_sources(message: impl Into<String>) -> Self {
        ConfigError::ConflictingSources(message.into())
    }

    /// Dotted settings key the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}
