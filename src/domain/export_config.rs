//! Export configuration domain models
//!
//! An `ExportConfig` is one scheduling unit: it names a region, a target
//! bucket, the retrospective windows to export, and the signing identities
//! whose descriptors are surfaced in the emitted archives. Due-ness is
//! decided by the config repository; the engine only consumes configs it
//! is handed.

use chrono::{DateTime, Duration, Utc};

/// Describes one signing identity surfaced in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    /// Key version string, copied verbatim into the archive when non-empty
    pub signing_key_version: Option<String>,

    /// Key identifier, copied verbatim into the archive when non-empty
    pub signing_key_id: Option<String>,

    /// Expiry of this identity; expired identities are filtered at export time
    pub end_timestamp: Option<DateTime<Utc>>,
}

impl SignatureInfo {
    /// Whether this identity is still active at the given instant.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.end_timestamp {
            Some(end) => end >= now,
            None => true,
        }
    }
}

/// One export scheduling unit
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Identifier of this config; export file rows reference it by id
    pub id: i64,

    /// Region whose exposures are exported
    pub region: String,

    /// Target bucket for archives and index files
    pub bucket_name: String,

    /// Object-name prefix under the bucket
    pub filename_root: String,

    /// Retrospective window of the large batch set
    pub period_of_big_file: Duration,

    /// Retrospective window of the medium batch set
    pub period_of_medium_file: Duration,

    /// Retrospective window of the per-day batch sets
    pub period_of_daily_files: Duration,

    /// Pool-eligibility window for red-warning exposures
    pub period_red_warnings: Duration,

    /// Pool-eligibility window for yellow-warning exposures
    pub period_yellow_warnings: Duration,

    /// Signing identities attached to this config
    pub signature_infos: Vec<SignatureInfo>,
}

impl ExportConfig {
    /// Validates the parts of the config the export pipeline depends on.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message naming the invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket_name.trim().is_empty() {
            return Err(format!("export config {} has no bucket name", self.id));
        }
        if self.filename_root.trim().is_empty() {
            return Err(format!("export config {} has no filename root", self.id));
        }
        if self.region.trim().is_empty() {
            return Err(format!("export config {} has no region", self.id));
        }
        Ok(())
    }

    /// Signing identities still active at `now`.
    pub fn active_signature_infos(&self, now: DateTime<Utc>) -> Vec<SignatureInfo> {
        self.signature_infos
            .iter()
            .filter(|si| si.is_active_at(now))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> ExportConfig {
        ExportConfig {
            id: 1,
            region: "AT".to_string(),
            bucket_name: "exposures".to_string(),
            filename_root: "AT".to_string(),
            period_of_big_file: Duration::days(14),
            period_of_medium_file: Duration::days(7),
            period_of_daily_files: Duration::days(3),
            period_red_warnings: Duration::days(14),
            period_yellow_warnings: Duration::days(7),
            signature_infos: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_bucket() {
        let mut config = config();
        config.bucket_name = "  ".to_string();
        assert!(config.validate().unwrap_err().contains("bucket"));
    }

    #[test]
    fn test_signature_info_expiry_filter() {
        let now = Utc.with_ymd_and_hms(2020, 12, 1, 12, 0, 0).unwrap();
        let active = SignatureInfo {
            signing_key_version: Some("v1".to_string()),
            signing_key_id: Some("key-a".to_string()),
            end_timestamp: None,
        };
        let expired = SignatureInfo {
            signing_key_version: Some("v1".to_string()),
            signing_key_id: Some("key-b".to_string()),
            end_timestamp: Some(now - Duration::hours(1)),
        };
        let expiring_later = SignatureInfo {
            signing_key_version: Some("v2".to_string()),
            signing_key_id: Some("key-c".to_string()),
            end_timestamp: Some(now + Duration::hours(1)),
        };

        let mut config = config();
        config.signature_infos = vec![active, expired, expiring_later];

        let filtered = config.active_signature_infos(now);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|si| si.signing_key_id.as_deref() != Some("key-b")));
    }
}
