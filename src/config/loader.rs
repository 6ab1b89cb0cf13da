//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Loading performs, in order:
//!
//! 1. Read the TOML file
//! 2. Substitute `${VAR_NAME}` references from the environment
//! 3. Parse into [`TekportConfig`]
//! 4. Apply `TEKPORT_*` scalar overrides
//! 5. Validate
//!
//! Supported override variables:
//!
//! ```bash
//! TEKPORT_APPLICATION_LOG_LEVEL=debug
//! TEKPORT_EXPORT_MAX_RECORDS=50000
//! TEKPORT_EXPORT_MIN_RECORDS=500
//! TEKPORT_EXPORT_PADDING_RANGE=200
//! TEKPORT_EXPORT_CREATE_TIMEOUT_SECS=900
//! TEKPORT_EXPORT_EXPORT_CURRENT_DAY=true
//! TEKPORT_BLOBSTORE_ROOT=/srv/exposures
//! TEKPORT_SIGNER_KEY_PATH=/etc/tekport/key.pem
//! ```

use crate::config::schema::TekportConfig;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, an environment variable
/// referenced with `${VAR}` is unset, parsing fails, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<TekportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TekportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        TekportError::Configuration(format!("Failed to read {}: {e}", path.display()))
    })?;

    let substituted = substitute_env_vars(&raw)?;
    let mut config: TekportConfig = toml::from_str(&substituted)?;
    apply_env_overrides(&mut config)?;

    config.validate().map_err(TekportError::Configuration)?;
    Ok(config)
}

/// Replaces `${VAR_NAME}` references with environment variable values.
fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| TekportError::Configuration(format!("Invalid substitution regex: {e}")))?;

    let mut missing = Vec::new();
    let substituted = pattern.replace_all(content, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match std::env::var(name) {
            Ok(value) => value,
            Err(_) => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(substituted.into_owned())
    } else {
        Err(TekportError::Configuration(format!(
            "Missing environment variables referenced in config: {}",
            missing.join(", ")
        )))
    }
}

/// Applies `TEKPORT_*` environment overrides to scalar settings.
fn apply_env_overrides(config: &mut TekportConfig) -> Result<()> {
    if let Some(value) = env_var("TEKPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = value;
    }
    if let Some(value) = env_var("TEKPORT_EXPORT_MAX_RECORDS") {
        config.export.max_records = parse_override("TEKPORT_EXPORT_MAX_RECORDS", &value)?;
    }
    if let Some(value) = env_var("TEKPORT_EXPORT_MIN_RECORDS") {
        config.export.min_records = parse_override("TEKPORT_EXPORT_MIN_RECORDS", &value)?;
    }
    if let Some(value) = env_var("TEKPORT_EXPORT_PADDING_RANGE") {
        config.export.padding_range = parse_override("TEKPORT_EXPORT_PADDING_RANGE", &value)?;
    }
    if let Some(value) = env_var("TEKPORT_EXPORT_CREATE_TIMEOUT_SECS") {
        config.export.create_timeout_secs =
            parse_override("TEKPORT_EXPORT_CREATE_TIMEOUT_SECS", &value)?;
    }
    if let Some(value) = env_var("TEKPORT_EXPORT_EXPORT_CURRENT_DAY") {
        config.export.export_current_day =
            parse_override("TEKPORT_EXPORT_EXPORT_CURRENT_DAY", &value)?;
    }
    if let Some(value) = env_var("TEKPORT_BLOBSTORE_ROOT") {
        config.blobstore.root = value;
    }
    if let Some(value) = env_var("TEKPORT_SIGNER_KEY_PATH") {
        config.signer.key_path = value;
    }
    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_override<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        TekportError::Configuration(format!("Invalid value for {name}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[export]
max_records = 100
min_records = 10
padding_range = 4

[blobstore]
root = "/tmp/blobs"

[signer]
key_path = "/tmp/key.pem"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TEKPORT_TEST_SUBST_ROOT", "/srv/blobs");
        let content = "root = \"${TEKPORT_TEST_SUBST_ROOT}\"";
        let result = substitute_env_vars(content).unwrap();
        assert_eq!(result, "root = \"/srv/blobs\"");
        std::env::remove_var("TEKPORT_TEST_SUBST_ROOT");
    }

    #[test]
    fn test_substitute_missing_var_fails() {
        let content = "root = \"${TEKPORT_TEST_DEFINITELY_UNSET}\"";
        assert!(substitute_env_vars(content).is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: TekportConfig = toml::from_str(MINIMAL_TOML).unwrap();
        assert_eq!(config.export.max_records, 100);
        assert_eq!(config.export.min_records, 10);
        assert!(!config.export.export_current_day);
        assert_eq!(config.application.log_level, "info");
        assert!(config.configs.is_empty());
    }

    #[test]
    fn test_parse_config_entries() {
        let toml_content = format!(
            "{MINIMAL_TOML}
[[configs]]
id = 1
region = \"AT\"
bucket_name = \"exposures\"
filename_root = \"AT\"
period_of_big_file_days = 14
period_of_medium_file_days = 7
period_of_daily_files_days = 3
period_red_warnings_days = 14
period_yellow_warnings_days = 7

[[configs.signature_infos]]
signing_key_version = \"v1\"
signing_key_id = \"key-a\"
"
        );
        let config: TekportConfig = toml::from_str(&toml_content).unwrap();
        assert_eq!(config.configs.len(), 1);
        let domain = config.configs[0].to_domain();
        assert_eq!(domain.region, "AT");
        assert_eq!(domain.signature_infos.len(), 1);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/tekport.toml").unwrap_err();
        assert!(matches!(err, TekportError::Configuration(_)));
    }
}
