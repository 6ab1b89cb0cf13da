//! Command-line interface for tekport
//!
//! Two commands: `export` runs one export tick (cadence belongs to cron or
//! a timer unit), `validate-config` checks a configuration file.

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::export::ExportArgs;
pub use commands::validate::ValidateConfigArgs;

/// tekport - exposure key export engine
#[derive(Parser, Debug)]
#[command(name = "tekport", version, about = "Exposure key export engine")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tekport.toml")]
    pub config: String,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one export tick
    Export(ExportArgs),
    /// Validate the configuration file
    ValidateConfig(ValidateConfigArgs),
}
