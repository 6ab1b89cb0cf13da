//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateConfigArgs {}

impl ValidateConfigArgs {
    /// Execute the validate-config command
    ///
    /// Returns the process exit code: 0 when the file is valid, 1 otherwise.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                println!("  export configs: {}", config.configs.len());
                println!("  blobstore root: {}", config.blobstore.root);
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration is invalid: {e}");
                Ok(1)
            }
        }
    }
}
