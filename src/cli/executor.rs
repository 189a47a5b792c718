//! Command executor for dispatching CLI commands
//!
//! Runs the handler for the parsed command, prints its JSON output on stdout
//! and maps the outcome to a process exit code.

use std::io::Write;
use std::process::ExitCode;

use super::handlers::{CommandOutput, GatewayCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands, WebhookAction};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// # Returns
/// `ExitCode::SUCCESS` when the command achieved its goal, `ExitCode::FAILURE`
/// when a dispatch came back failed. The JSON output is printed in both cases.
///
/// # Errors
/// Flag combination errors, request validation errors and gateway errors of
/// the management commands
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<ExitCode> {
    let output = run_command(cli, settings).await?;
    print_output(&output, &mut std::io::stdout().lock())?;

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run the handler for `cli.command` and return its output without printing
pub async fn run_command(cli: &Cli, settings: Settings) -> AppResult<CommandOutput> {
    validate_command_args(cli)?;

    match &cli.command {
        Commands::Send {
            backend,
            to,
            message,
            dry_run,
            ..
        } => {
            SendCommandHandler::new(settings)?
                .execute((*backend).into(), to, message, *dry_run)
                .await
        }
        Commands::Status { id, .. } => GatewayCommandHandler::new(&settings)?.status(id).await,
        Commands::Webhooks { action, .. } => {
            let handler = GatewayCommandHandler::new(&settings)?;
            match action {
                WebhookAction::List => handler.list_webhooks().await,
                WebhookAction::Register { event, url, id } => {
                    handler
                        .register_webhook((*event).into(), url, id.as_deref())
                        .await
                }
                WebhookAction::Delete { id } => handler.delete_webhook(id).await,
            }
        }
    }
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })
}

fn print_output(output: &CommandOutput, out: &mut impl Write) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(&output.body)
        .map_err(|e| AppError::Internal { source: e.into() })?;
    writeln!(out, "{}", rendered).map_err(|e| AppError::Internal { source: e.into() })
}
