//! Configuration management for tekport.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR}` syntax), `TEKPORT_*` overrides for scalar settings, and
//! validation on load.
//!
//! # Example configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! max_records = 30000
//! min_records = 1000
//! padding_range = 100
//! create_timeout_secs = 600
//! export_current_day = false
//!
//! [blobstore]
//! root = "/srv/tekport/blobs"
//!
//! [signer]
//! key_path = "/etc/tekport/signing-key.pem"
//!
//! [repository]
//! exposures_path = "/srv/tekport/exposures.json"
//!
//! [[configs]]
//! id = 1
//! region = "AT"
//! bucket_name = "exposures"
//! filename_root = "AT"
//! period_of_big_file_days = 14
//! period_of_medium_file_days = 7
//! period_of_daily_files_days = 3
//! period_red_warnings_days = 14
//! period_yellow_warnings_days = 7
//!
//! [[configs.signature_infos]]
//! signing_key_version = "v1"
//! signing_key_id = "key-a"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationSettings, BlobstoreSettings, ExportConfigEntry, ExportSettings, LoggingConfig,
    RepositorySettings, SignatureInfoEntry, SignerSettings, TekportConfig,
};
