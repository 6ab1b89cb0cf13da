// tekport - Exposure Key Export Engine
// Copyright (c) 2025 tekport Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use tekport::cli::{Cli, Commands};
use tekport::config::LoggingConfig;
use tekport::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is a service concern
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "tekport - exposure key export engine"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
