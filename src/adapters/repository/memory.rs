//! In-memory repository implementations
//!
//! Back tests and the standalone deployment, where exposures are seeded
//! from a JSON drop and export configs from the TOML config file.

use crate::adapters::repository::{ExportConfigRepository, ExportFileRepository, ExposureRepository};
use crate::domain::errors::TekportError;
use crate::domain::{DiagnosisType, ExportConfig, ExportFile, Exposure, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

/// One stored exposure: the domain exposure plus its publish timestamp.
///
/// The publish timestamp drives the `[from, until)` window query; it lives
/// on the persistence side and is not part of the exported payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureRecord {
    /// When the publish path accepted this exposure
    pub published_at: DateTime<Utc>,

    /// The exposure itself
    #[serde(flatten)]
    pub exposure: Exposure,
}

/// Exposure repository over an in-memory record list
#[derive(Default)]
pub struct MemoryExposureRepository {
    records: Vec<ExposureRecord>,
}

impl MemoryExposureRepository {
    /// Creates a repository over the given records.
    pub fn new(records: Vec<ExposureRecord>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON file containing an array of records.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            TekportError::Configuration(format!("reading exposures {}: {e}", path.display()))
        })?;
        let records: Vec<ExposureRecord> = serde_json::from_slice(&data).map_err(|e| {
            TekportError::Configuration(format!("parsing exposures {}: {e}", path.display()))
        })?;
        Ok(Self::new(records))
    }
}

#[async_trait]
impl ExposureRepository for MemoryExposureRepository {
    async fn find_for_export(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        diagnosis_type: DiagnosisType,
        region: &str,
    ) -> Result<Vec<Exposure>> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.published_at >= from
                    && r.published_at < until
                    && r.exposure.diagnosis_type == diagnosis_type
                    && r.exposure.region == region
            })
            .map(|r| r.exposure.clone())
            .collect())
    }
}

/// Config repository over a fixed list
///
/// Every registered config is considered due on every tick; schedule
/// evaluation belongs to the SQL-backed implementation.
#[derive(Default)]
pub struct MemoryExportConfigRepository {
    configs: Vec<ExportConfig>,
}

impl MemoryExportConfigRepository {
    /// Creates a repository over the given configs.
    pub fn new(configs: Vec<ExportConfig>) -> Self {
        Self { configs }
    }
}

#[async_trait]
impl ExportConfigRepository for MemoryExportConfigRepository {
    async fn find_due_at(&self, _now: DateTime<Utc>) -> Result<Vec<ExportConfig>> {
        Ok(self.configs.clone())
    }
}

/// Export file repository appending rows to an in-memory list
#[derive(Default)]
pub struct MemoryExportFileRepository {
    rows: Mutex<Vec<ExportFile>>,
}

impl MemoryExportFileRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all saved rows.
    pub fn saved(&self) -> Vec<ExportFile> {
        self.rows.lock().expect("row mutex poisoned").clone()
    }
}

#[async_trait]
impl ExportFileRepository for MemoryExportFileRepository {
    async fn save(&self, file: ExportFile) -> Result<()> {
        self.rows.lock().expect("row mutex poisoned").push(file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(
        published_at: DateTime<Utc>,
        diagnosis_type: DiagnosisType,
        region: &str,
        key_byte: u8,
    ) -> ExposureRecord {
        ExposureRecord {
            published_at,
            exposure: Exposure {
                exposure_key: Exposure::encode_key(&[key_byte; 16]),
                transmission_risk: 3,
                interval_number: Some(2_673_792),
                interval_count: Some(144),
                region: region.to_string(),
                diagnosis_type,
            },
        }
    }

    #[tokio::test]
    async fn test_find_for_export_filters_window_type_and_region() {
        let base = Utc.with_ymd_and_hms(2020, 11, 30, 0, 0, 0).unwrap();
        let repo = MemoryExposureRepository::new(vec![
            record(base, DiagnosisType::RedWarning, "AT", 0x01),
            record(base, DiagnosisType::YellowWarning, "AT", 0x02),
            record(base, DiagnosisType::RedWarning, "DE", 0x03),
            record(base - chrono::Duration::days(30), DiagnosisType::RedWarning, "AT", 0x04),
        ]);

        let found = repo
            .find_for_export(
                base - chrono::Duration::days(14),
                base + chrono::Duration::days(1),
                DiagnosisType::RedWarning,
                "AT",
            )
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].exposure_key, Exposure::encode_key(&[0x01; 16]));
    }

    #[tokio::test]
    async fn test_window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2020, 11, 30, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2020, 12, 1, 0, 0, 0).unwrap();
        let repo = MemoryExposureRepository::new(vec![
            record(from, DiagnosisType::RedWarning, "AT", 0x01),
            record(until, DiagnosisType::RedWarning, "AT", 0x02),
        ]);

        let found = repo
            .find_for_export(from, until, DiagnosisType::RedWarning, "AT")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_export_file_repository_appends() {
        let repo = MemoryExportFileRepository::new();
        repo.save(ExportFile::created("a", "b", 1, "AT", 10)).await.unwrap();
        repo.save(ExportFile::created("c", "b", 1, "AT", 10)).await.unwrap();
        assert_eq!(repo.saved().len(), 2);
    }

    #[test]
    fn test_exposure_record_json_shape() {
        let json = r#"[{
            "publishedAt": "2020-11-30T10:00:00Z",
            "exposureKey": "EREREREREREREREREREREQ==",
            "transmissionRisk": 3,
            "intervalNumber": 2673792,
            "intervalCount": 144,
            "region": "AT",
            "diagnosisType": "red-warning"
        }]"#;
        let records: Vec<ExposureRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].exposure.region, "AT");
        assert_eq!(records[0].exposure.diagnosis_type, DiagnosisType::RedWarning);
    }
}
