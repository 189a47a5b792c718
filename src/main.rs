use std::process::ExitCode;

use clap::Parser;

use sms_relay::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let settings = load_and_merge_config(cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = sms_relay::pkg_version(),
        environment = ?cli.env,
        "sms-relay starting"
    );

    Ok(execute_command(cli, settings).await?)
}
