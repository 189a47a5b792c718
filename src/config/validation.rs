//! Configuration validation logic
//!
//! Checks value ranges and formats after all layers are merged.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    CloudGatewayConfig, FileSettings, HttpClientConfig, LocalGatewayConfig, LoggerSettings,
    Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Parse `value` as an http(s) URL, reporting failures against `field`.
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::validation(field, format!("Invalid URL '{}': {}", value, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::validation(
            field,
            format!("Unsupported URL scheme '{}'. Use http or https.", other),
        )),
    }
}

impl HttpClientConfig {
    /// # Validation Rules
    /// - Both timeouts must be greater than 0
    /// - Connect timeout cannot exceed the request timeout
    /// - User agent must not be blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds > self.timeout_seconds {
            return Err(ConfigError::validation(
                "http.connect_timeout_seconds",
                format!(
                    "Connect timeout ({}s) cannot exceed request timeout ({}s).",
                    self.connect_timeout_seconds, self.timeout_seconds
                ),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::validation(
                "http.user_agent",
                "User agent cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl CloudGatewayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("cloud.base_url", &self.base_url)?;
        Ok(())
    }
}

impl LocalGatewayConfig {
    /// The endpoint may be blank (it can be given per command) but must be a
    /// valid http(s) URL when set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.trim().is_empty() {
            validate_http_url("local.endpoint", &self.endpoint)?;
        }
        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - File settings must be valid
    /// - At least one of console or file output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections, returning the first error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http.validate()?;
        self.cloud.validate()?;
        self.local.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
