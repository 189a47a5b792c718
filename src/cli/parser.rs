//! CLI argument parsing with clap
//!
//! Defines the `sms-relay` command line: global flags, the `send` command
//! and the hosted-gateway management commands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;
use crate::external::sms_gate::WebHookEventType;
use crate::services::sms::Backend;

/// Send SMS through a hosted or self-hosted gateway
#[derive(Parser, Debug)]
#[command(name = "sms-relay")]
#[command(about = "Send SMS through a hosted or self-hosted gateway")]
#[command(long_about = "
sms-relay sends one SMS message to one or more phone numbers, either through
the hosted SMS gateway (cloud) or by posting straight to a gateway running on
your own network (local). The outcome is printed as JSON on stdout.

EXAMPLES:
    # Send through the hosted gateway
    sms-relay send --to +15550100 --message 'Backup finished' -u user -p pass

    # Send to several numbers through a phone on the LAN
    sms-relay send --backend local --endpoint http://192.168.1.11:8080/message \\
        --to +15550100,+15550101 --message 'Door opened'

    # Check what would be sent without sending
    sms-relay send --backend local --to +15550100 --message hi --dry-run

    # Look up the delivery state of a message
    sms-relay status PyDmBQZZXYmyxMwED8Fzy

    # Manage webhooks on the hosted gateway
    sms-relay webhooks list
    sms-relay webhooks register --event sms:received --url https://hooks.example/sms

Credentials and endpoints may also come from config/*.toml or SMS_RELAY_*
environment variables (e.g. SMS_RELAY_CLOUD__PASSWORD).
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered files under config/.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/sms-relay/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which config/{environment}.toml layer is loaded.
    ///
    /// Available values: development (dev), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Credentials and address of a gateway, overriding configuration
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayArgs {
    /// Gateway username
    #[arg(short, long, value_name = "USER")]
    pub username: Option<String>,

    /// Gateway password
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Base URL of the hosted gateway API (cloud backend only)
    #[arg(long, value_name = "URL", value_parser = super::validation::validate_http_url)]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message to one or more phone numbers
    ///
    /// Examples:
    ///   sms-relay send --to +15550100 --message hi
    ///   sms-relay send -b local --endpoint http://192.168.1.11:8080/message --to +15550100 -m hi
    Send {
        /// Gateway backend to send through
        #[arg(short, long, value_enum, default_value_t = BackendArg::Cloud)]
        backend: BackendArg,

        /// Recipient phone number (repeat or separate with commas)
        ///
        /// Blank entries are ignored.
        #[arg(short, long = "to", value_name = "NUMBER", value_delimiter = ',')]
        to: Vec<String>,

        /// Message text
        #[arg(short, long, value_name = "TEXT")]
        message: String,

        #[command(flatten)]
        gateway: GatewayArgs,

        /// Local gateway URL (local backend only)
        ///
        /// Example: --endpoint http://192.168.1.11:8080/message
        #[arg(long, value_name = "URL", value_parser = super::validation::validate_http_url)]
        endpoint: Option<String>,

        /// Validate and print the request without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the delivery state of a message sent through the hosted gateway
    Status {
        /// Message ID returned by `send`
        #[arg(value_name = "MESSAGE_ID")]
        id: String,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// Manage webhooks registered on the hosted gateway
    Webhooks {
        #[command(subcommand)]
        action: WebhookAction,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    /// List registered webhooks
    List,

    /// Register a webhook, or replace one when --id is given
    Register {
        #[arg(long, value_enum)]
        event: WebhookEvent,

        /// URL the gateway will call
        #[arg(long, value_name = "URL", value_parser = super::validation::validate_http_url)]
        url: String,

        /// Existing webhook ID to replace
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a webhook
    Delete {
        #[arg(value_name = "WEBHOOK_ID")]
        id: String,
    },
}

/// Backend options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    /// Hosted gateway
    #[value(name = "cloud")]
    Cloud,
    /// Self-hosted gateway on your network
    #[value(name = "local")]
    Local,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Webhook event options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebhookEvent {
    #[value(name = "sms:received")]
    SmsReceived,
    #[value(name = "sms:sent")]
    SmsSent,
    #[value(name = "sms:delivered")]
    SmsDelivered,
    #[value(name = "sms:failed")]
    SmsFailed,
    #[value(name = "system:ping")]
    SystemPing,
}

impl Cli {
    /// Check flag combinations clap can't express on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Commands::Send {
            backend,
            gateway,
            endpoint,
            ..
        } = &self.command
        {
            match backend {
                BackendArg::Cloud if endpoint.is_some() => {
                    return Err("--endpoint only applies to the local backend".to_string());
                }
                BackendArg::Local if gateway.base_url.is_some() => {
                    return Err("--base-url only applies to the cloud backend".to_string());
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl From<BackendArg> for Backend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Cloud => Backend::Cloud,
            BackendArg::Local => Backend::Local,
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

impl From<WebhookEvent> for WebHookEventType {
    fn from(event: WebhookEvent) -> Self {
        match event {
            WebhookEvent::SmsReceived => WebHookEventType::SmsReceived,
            WebhookEvent::SmsSent => WebHookEventType::SmsSent,
            WebhookEvent::SmsDelivered => WebHookEventType::SmsDelivered,
            WebhookEvent::SmsFailed => WebHookEventType::SmsFailed,
            WebhookEvent::SystemPing => WebHookEventType::SystemPing,
        }
    }
}
