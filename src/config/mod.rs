//! Configuration management for sms-relay
//!
//! Layered loading with the `config` crate:
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed to version control)
//! 4. `SMS_RELAY_*` environment variables
//!
//! Command-line flags are merged on top by `cli::ConfigurationMerger`.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{CloudGatewayConfig, HttpClientConfig, LocalGatewayConfig, Settings};
