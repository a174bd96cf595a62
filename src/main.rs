//! nowplaying - command-line entry point.
//!
//! Loads the configuration, sets up logging and dispatches to the CLI.

use std::{env, error::Error, process};

use nowplaying::{
    cli::{CliService, formatting::format_error},
    config::Config,
    tracing_config,
};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let is_long_running = matches!(
        (args.first().map(String::as_str), args.get(1).map(String::as_str)),
        (Some("player"), Some("watch"))
    );

    let _guard = if is_long_running {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    run_cli_command(config, &args).await;

    Ok(())
}

/// Executes CLI commands through the CliService.
///
/// The first argument selects the category, the second the command; the
/// rest are passed to the command. No arguments prints help.
async fn run_cli_command(config: Config, args: &[String]) {
    let cli_service = CliService::new(config);

    let category = args.first().map(|s| s.as_str()).unwrap_or("help");
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("");
    let command_args = args.get(2..).unwrap_or(&[]);

    debug!(category, command, "Dispatching command");

    match cli_service
        .execute_command(category, command, command_args)
        .await
    {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
