//! Configuration merger for CLI arguments and config files
//!
//! Flags given on the command line win over file and environment values.

use super::parser::{BackendArg, Cli, Commands, Environment, GatewayArgs};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use std::path::{Path, PathBuf};

/// Applies command-line overrides on top of loaded [`Settings`]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base settings, from `config_path` when given, else from the
    /// layered config directory.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_config_path(
        config_path: Option<&PathBuf>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = config_path {
            // The file may have vanished since clap checked it
            Self::validate_config_file_access(path)?;
            loader = loader.with_config_file(path);
        }

        if let Some(env) = environment {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    fn validate_config_file_access(path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::validation(
                "config_file",
                format!("Configuration file does not exist: '{}'", path.display()),
            ));
        }

        std::fs::File::open(path).map(|_| ()).map_err(|e| {
            ConfigError::validation(
                "config_file",
                format!("Cannot read configuration file '{}': {}", path.display(), e),
            )
        })
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);
        self.apply_command_overrides(&mut config, &cli.command);

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Send {
                backend: BackendArg::Local,
                gateway,
                endpoint,
                ..
            } => {
                if let Some(endpoint) = endpoint {
                    config.local.endpoint = endpoint.clone();
                }
                override_credentials(
                    &mut config.local.username,
                    &mut config.local.password,
                    gateway,
                );
            }
            Commands::Send {
                backend: BackendArg::Cloud,
                gateway,
                ..
            }
            | Commands::Status { gateway, .. }
            | Commands::Webhooks { gateway, .. } => {
                if let Some(base_url) = &gateway.base_url {
                    config.cloud.base_url = base_url.clone();
                }
                override_credentials(
                    &mut config.cloud.username,
                    &mut config.cloud.password,
                    gateway,
                );
            }
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn override_credentials(username: &mut String, password: &mut String, gateway: &GatewayArgs) {
    if let Some(value) = &gateway.username {
        *username = value.clone();
    }
    if let Some(value) = &gateway.password {
        *password = value.clone();
    }
}
