//! Configuration schema types
//!
//! This module defines the configuration structure for tekport: process
//! settings for the export pipeline plus, for the file-backed standalone
//! deployment, the export config entries themselves.

use crate::domain::export_config::{ExportConfig, SignatureInfo};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Main tekport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TekportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationSettings,

    /// Export pipeline settings
    pub export: ExportSettings,

    /// Blob storage settings
    pub blobstore: BlobstoreSettings,

    /// Signing key settings
    pub signer: SignerSettings,

    /// Repository seeding settings
    #[serde(default)]
    pub repository: RepositorySettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export configurations for the file-backed deployment
    #[serde(default)]
    pub configs: Vec<ExportConfigEntry>,
}

impl TekportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.blobstore.validate()?;
        self.signer.validate()?;
        self.logging.validate()?;
        for entry in &self.configs {
            entry.to_domain().validate()?;
        }
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationSettings {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Maximum number of keys per archive; larger windows are sharded
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Minimum number of keys per published archive; short batches are
    /// padded up to this
    #[serde(default = "default_min_records")]
    pub min_records: usize,

    /// Width of the uniform jitter added on top of `min_records`
    #[serde(default = "default_padding_range")]
    pub padding_range: usize,

    /// Lock TTL for one tick, seconds; must cover the whole run
    #[serde(default = "default_create_timeout_secs")]
    pub create_timeout_secs: u64,

    /// Whether the current (incomplete) day is included in exports
    #[serde(default)]
    pub export_current_day: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            min_records: default_min_records(),
            padding_range: default_padding_range(),
            create_timeout_secs: default_create_timeout_secs(),
            export_current_day: false,
        }
    }
}

impl ExportSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_records == 0 {
            return Err("max_records must be at least 1".to_string());
        }
        if self.min_records == 0 {
            return Err("min_records must be at least 1".to_string());
        }
        if self.padding_range == 0 {
            return Err("padding_range must be at least 1".to_string());
        }
        if self.create_timeout_secs == 0 {
            return Err("create_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Blob storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobstoreSettings {
    /// Root directory the filesystem blobstore writes buckets under
    pub root: String,
}

impl BlobstoreSettings {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("blobstore root must not be empty".to_string());
        }
        Ok(())
    }
}

/// Signing key configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerSettings {
    /// Path to the PKCS#8 PEM-encoded P-256 private key
    pub key_path: String,
}

impl SignerSettings {
    fn validate(&self) -> Result<(), String> {
        if self.key_path.trim().is_empty() {
            return Err("signer key_path must not be empty".to_string());
        }
        Ok(())
    }
}

/// Repository seeding configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySettings {
    /// JSON file with exposure records to seed the in-memory repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposures_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to also write JSON logs to a local file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory the rotating log files are written to
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

/// One export config entry in the TOML file
///
/// Periods are given in days; the entry converts into the domain
/// [`ExportConfig`] the repository hands to the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfigEntry {
    /// Config identifier
    pub id: i64,

    /// Region whose exposures are exported
    pub region: String,

    /// Target bucket
    pub bucket_name: String,

    /// Object-name prefix under the bucket
    pub filename_root: String,

    /// Retrospective window of the large batch set, days
    pub period_of_big_file_days: i64,

    /// Retrospective window of the medium batch set, days
    pub period_of_medium_file_days: i64,

    /// Retrospective window of the per-day batch sets, days
    pub period_of_daily_files_days: i64,

    /// Pool-eligibility window for red warnings, days
    pub period_red_warnings_days: i64,

    /// Pool-eligibility window for yellow warnings, days
    pub period_yellow_warnings_days: i64,

    /// Signing identities attached to this config
    #[serde(default)]
    pub signature_infos: Vec<SignatureInfoEntry>,
}

impl ExportConfigEntry {
    /// Converts this entry into the domain config.
    pub fn to_domain(&self) -> ExportConfig {
        ExportConfig {
            id: self.id,
            region: self.region.clone(),
            bucket_name: self.bucket_name.clone(),
            filename_root: self.filename_root.clone(),
            period_of_big_file: Duration::days(self.period_of_big_file_days),
            period_of_medium_file: Duration::days(self.period_of_medium_file_days),
            period_of_daily_files: Duration::days(self.period_of_daily_files_days),
            period_red_warnings: Duration::days(self.period_red_warnings_days),
            period_yellow_warnings: Duration::days(self.period_yellow_warnings_days),
            signature_infos: self.signature_infos.iter().map(SignatureInfoEntry::to_domain).collect(),
        }
    }
}

/// One signing identity entry in the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInfoEntry {
    /// Key version surfaced in the archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_key_version: Option<String>,

    /// Key id surfaced in the archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,

    /// Expiry of this identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<DateTime<Utc>>,
}

impl SignatureInfoEntry {
    fn to_domain(&self) -> SignatureInfo {
        SignatureInfo {
            signing_key_version: self.signing_key_version.clone(),
            signing_key_id: self.signing_key_id.clone(),
            end_timestamp: self.end_timestamp,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_records() -> usize {
    30_000
}

fn default_min_records() -> usize {
    1_000
}

fn default_padding_range() -> usize {
    100
}

fn default_create_timeout_secs() -> u64 {
    600
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> TekportConfig {
        TekportConfig {
            application: ApplicationSettings::default(),
            export: ExportSettings::default(),
            blobstore: BlobstoreSettings {
                root: "/var/lib/tekport/blobs".to_string(),
            },
            signer: SignerSettings {
                key_path: "/etc/tekport/signing-key.pem".to_string(),
            },
            repository: RepositorySettings::default(),
            logging: LoggingConfig::default(),
            configs: Vec::new(),
        }
    }

    #[test]
    fn test_minimal_config_validates() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_zero_max_records_rejected() {
        let mut config = minimal_config();
        config.export.max_records = 0;
        assert!(config.validate().unwrap_err().contains("max_records"));
    }

    #[test]
    fn test_zero_padding_range_rejected() {
        let mut config = minimal_config();
        config.export.padding_range = 0;
        assert!(config.validate().unwrap_err().contains("padding_range"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = minimal_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_entry_conversion() {
        let entry = ExportConfigEntry {
            id: 1,
            region: "AT".to_string(),
            bucket_name: "exposures".to_string(),
            filename_root: "AT".to_string(),
            period_of_big_file_days: 14,
            period_of_medium_file_days: 7,
            period_of_daily_files_days: 3,
            period_red_warnings_days: 14,
            period_yellow_warnings_days: 7,
            signature_infos: vec![SignatureInfoEntry {
                signing_key_version: Some("v1".to_string()),
                signing_key_id: Some("key-a".to_string()),
                end_timestamp: None,
            }],
        };

        let domain = entry.to_domain();
        assert_eq!(domain.period_of_big_file, Duration::days(14));
        assert_eq!(domain.signature_infos.len(), 1);
        assert!(domain.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_entry_rejected() {
        let mut config = minimal_config();
        config.configs.push(ExportConfigEntry {
            id: 1,
            region: "AT".to_string(),
            bucket_name: String::new(),
            filename_root: "AT".to_string(),
            period_of_big_file_days: 14,
            period_of_medium_file_days: 7,
            period_of_daily_files_days: 3,
            period_red_warnings_days: 14,
            period_yellow_warnings_days: 7,
            signature_infos: Vec::new(),
        });
        assert!(config.validate().is_err());
    }
}
