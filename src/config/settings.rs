//! Configuration settings structures for sms-relay
//!
//! Every section is optional in the TOML files; missing fields take the
//! defaults below.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::external::sms_gate::DEFAULT_BASE_URL;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("sms-relay/{}", crate::pkg_version())
}

fn default_cloud_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_local_endpoint() -> String {
    "http://localhost:8080/message".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/sms-relay.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// HTTP client

/// Settings for the shared outbound `reqwest::Client`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept self-signed certificates. Phones running a gateway app on the LAN
    /// commonly serve HTTPS with one.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

// Gateways

/// Hosted gateway reached through the vendor client.
///
/// Credentials may be left empty here and supplied on the command line instead.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudGatewayConfig {
    #[serde(default = "default_cloud_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Default for CloudGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_cloud_base_url(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for CloudGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudGatewayConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Self-hosted gateway reached with a direct POST
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalGatewayConfig {
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Default for LocalGatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_local_endpoint(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for LocalGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalGatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Logger

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig {
            enabled: self.console.enabled,
            colored: self.console.colored,
        };
        let file = self.file.into_file_config()?;

        LoggerConfig::new(&self.level, console, file)
            .map_err(|e| ConfigError::validation("logger", format!("{:#}", e)))
    }
}

impl FileSettings {
    /// `None` when file output is disabled.
    pub fn into_file_config(self) -> Result<Option<FileConfig>, ConfigError> {
        if !self.enabled {
            return Ok(None);
        }

        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        let config = FileConfig {
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        };
        config
            .validate()
            .map_err(|e| ConfigError::validation("logger.file.path", e.to_string()))?;
        Ok(Some(config))
    }
}

/// Complete settings loaded from TOML files and `SMS_RELAY_*` variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpClientConfig,

    #[serde(default)]
    pub cloud: CloudGatewayConfig,

    #[serde(default)]
    pub local: LocalGatewayConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}
