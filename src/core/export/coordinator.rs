//! Export coordinator - main orchestrator for the export tick
//!
//! One tick acquires the export lock, enumerates the due configs, and for
//! each one assembles the exposure pool, materialises the big / medium /
//! daily batch sets, and publishes the index manifest. Peer workers racing
//! on the same tick are excluded by the lock; losing the race downgrades
//! the tick to a no-op.

use crate::adapters::blobstore::Blobstore;
use crate::adapters::lock::LockService;
use crate::adapters::repository::{ExportConfigRepository, ExportFileRepository, ExposureRepository};
use crate::adapters::signer::Signer;
use crate::config::ExportSettings;
use crate::core::export::marshal::BatchMarshaller;
use crate::core::export::padding;
use crate::domain::errors::TekportError;
use crate::domain::interval;
use crate::domain::{DiagnosisType, ExportConfig, ExportFile, Exposure, IndexFile, IndexFileBatch, Result};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Name of the lock serialising export ticks across workers
pub const EXPORT_LOCK_ID: &str = "export_files";

const FILENAME_SUFFIX: &str = ".zip";
const INDEX_FILE_NAME: &str = "index.json";

/// Export coordinator
pub struct ExportCoordinator {
    settings: ExportSettings,
    exposure_repository: Arc<dyn ExposureRepository>,
    config_repository: Arc<dyn ExportConfigRepository>,
    file_repository: Arc<dyn ExportFileRepository>,
    lock_service: Arc<dyn LockService>,
    blobstore: Arc<dyn Blobstore>,
    marshaller: BatchMarshaller,
}

impl ExportCoordinator {
    /// Creates a coordinator over the given collaborators.
    pub fn new(
        settings: ExportSettings,
        exposure_repository: Arc<dyn ExposureRepository>,
        config_repository: Arc<dyn ExportConfigRepository>,
        file_repository: Arc<dyn ExportFileRepository>,
        lock_service: Arc<dyn LockService>,
        blobstore: Arc<dyn Blobstore>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            settings,
            exposure_repository,
            config_repository,
            file_repository,
            lock_service,
            blobstore,
            marshaller: BatchMarshaller::new(signer),
        }
    }

    /// Runs one export tick at the current instant.
    pub async fn run_tick(&self) -> Result<()> {
        self.run_tick_at(Utc::now()).await
    }

    /// Runs one export tick at the given logical time.
    ///
    /// 1. Acquire the export lock; if a peer holds it, the tick is a clean
    ///    no-op.
    /// 2. Export every config due at `now`, in enumeration order. A
    ///    config-scoped error skips that config; any other error aborts the
    ///    tick.
    /// 3. Release the lock with the fencing token, whatever the outcome.
    pub async fn run_tick_at(&self, now: DateTime<Utc>) -> Result<()> {
        let ttl = Duration::seconds(self.settings.create_timeout_secs as i64);
        let release_timestamp = match self.lock_service.acquire(EXPORT_LOCK_ID, ttl).await {
            Ok(timestamp) => timestamp,
            Err(TekportError::LockNotAcquired(_)) => {
                tracing::info!(
                    lock_id = EXPORT_LOCK_ID,
                    "Export lock held by another worker - skipping tick"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut outcome = Ok(());
        match self.config_repository.find_due_at(now).await {
            Ok(configs) => {
                let mut processed = 0usize;
                for config in &configs {
                    match self.export_config(config, now).await {
                        Ok(()) => processed += 1,
                        Err(e) if e.is_config_scoped() => {
                            tracing::error!(
                                config_id = config.id,
                                error = %e,
                                "Skipping invalid export config"
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                config_id = config.id,
                                error = %e,
                                "Export tick aborted"
                            );
                            outcome = Err(e);
                            break;
                        }
                    }
                }
                tracing::info!(processed, total = configs.len(), "Processed export configs");
            }
            Err(e) => outcome = Err(e),
        }

        match self
            .lock_service
            .release(EXPORT_LOCK_ID, release_timestamp)
            .await
        {
            Ok(released) => {
                tracing::debug!(lock_id = EXPORT_LOCK_ID, released, "Released export lock");
            }
            Err(e) => {
                tracing::warn!(lock_id = EXPORT_LOCK_ID, error = %e, "Failed to release export lock");
            }
        }

        outcome
    }

    /// Exports one config: assembles the pool, writes the big, medium and
    /// daily batch sets, then publishes the index.
    async fn export_config(&self, config: &ExportConfig, now: DateTime<Utc>) -> Result<()> {
        config.validate().map_err(TekportError::Configuration)?;

        let file_date = now;
        let start_of_today = interval::start_of_day_utc(now);
        let until = if self.settings.export_current_day {
            now
        } else {
            start_of_today
        };
        let from_red = start_of_today - config.period_red_warnings;
        let from_yellow = start_of_today - config.period_yellow_warnings;

        // The diagnosis windows decide pool eligibility; the batch windows
        // below only restrict by interval number.
        let mut all_exposures = self
            .exposure_repository
            .find_for_export(from_red, until, DiagnosisType::RedWarning, &config.region)
            .await?;
        let yellow_exposures = self
            .exposure_repository
            .find_for_export(from_yellow, until, DiagnosisType::YellowWarning, &config.region)
            .await?;
        all_exposures.extend(yellow_exposures);

        let end_interval = interval::interval_number(until);

        let big_start_date = start_of_today - config.period_of_big_file;
        let big_start = interval::interval_number(big_start_date);
        tracing::info!(
            config_id = config.id,
            start_date = %big_start_date.date_naive(),
            days = config.period_of_big_file.num_days(),
            "Creating full export files"
        );
        let big_exposures = filter_by_interval(&all_exposures, big_start, end_interval);
        let big_files = self
            .export_exposures(
                &format!("batch_full{}", config.period_of_big_file.num_days()),
                file_date,
                config,
                start_of_today,
                until,
                big_start,
                big_exposures,
            )
            .await?;
        let full_big_batch = IndexFileBatch::new(big_start, big_files);

        let medium_start_date = start_of_today - config.period_of_medium_file;
        let medium_start = interval::interval_number(medium_start_date);
        tracing::info!(
            config_id = config.id,
            start_date = %medium_start_date.date_naive(),
            days = config.period_of_medium_file.num_days(),
            "Creating full export files"
        );
        let medium_exposures = filter_by_interval(&all_exposures, medium_start, end_interval);
        let medium_files = self
            .export_exposures(
                &format!("batch_full{}", config.period_of_medium_file.num_days()),
                file_date,
                config,
                start_of_today,
                until,
                medium_start,
                medium_exposures,
            )
            .await?;
        let full_medium_batch = IndexFileBatch::new(medium_start, medium_files);

        let mut daily_batches = Vec::new();
        let mut date = start_of_today - config.period_of_daily_files;
        while date < until {
            let day_start = interval::interval_number(date);
            let day_end = interval::interval_number(date + Duration::days(1));
            let exposures_for_date = filter_by_interval(&all_exposures, day_start, day_end);
            tracing::info!(config_id = config.id, start_date = %date.date_naive(), "Creating daily export file");
            tracing::trace!(start_interval = day_start, end_interval = day_end, "Daily interval window");

            let mut end_date = date + Duration::days(1);
            if end_date > file_date {
                end_date = file_date;
            }
            let daily_files = self
                .export_exposures("batch", file_date, config, date, end_date, day_start, exposures_for_date)
                .await?;
            daily_batches.push(IndexFileBatch::new(day_start, daily_files));
            date += Duration::days(1);
        }

        let index_file = IndexFile {
            full_big_batch,
            full_medium_batch,
            daily_batches,
        };
        let index_content = serde_json::to_vec(&index_file)?;
        let index_name = format!(
            "{}/{}/{}",
            config.filename_root,
            file_date.timestamp(),
            INDEX_FILE_NAME
        );
        self.blobstore
            .put(&config.bucket_name, &index_name, &index_content)
            .await?;
        self.file_repository
            .save(ExportFile::created(
                &index_name,
                &config.bucket_name,
                config.id,
                &config.region,
                file_date.timestamp(),
            ))
            .await?;

        // The stable alias is rewritten last so clients always observe a
        // fully-uploaded set.
        let common_index_name = format!("{}/{}", config.filename_root, INDEX_FILE_NAME);
        self.blobstore
            .copy(&config.bucket_name, &index_name, &common_index_name)
            .await?;
        tracing::info!(config_id = config.id, "Export config completed");
        Ok(())
    }

    /// Shards one batch set into archives of at most `max_records` keys,
    /// pads the last shard when it is short of `min_records`, marshals and
    /// uploads each archive, and records the bookkeeping rows.
    ///
    /// Returns the `/{bucket}/{object}` paths in batch order; an empty
    /// input yields an empty list and no uploads.
    #[allow(clippy::too_many_arguments)]
    async fn export_exposures(
        &self,
        file_prefix: &str,
        file_date: DateTime<Utc>,
        config: &ExportConfig,
        start_timestamp: DateTime<Utc>,
        end_timestamp: DateTime<Utc>,
        interval_number: i64,
        exposures: Vec<Exposure>,
    ) -> Result<Vec<String>> {
        let max_records = self.settings.max_records.max(1);
        let mut groups: Vec<Vec<Exposure>> = exposures
            .chunks(max_records)
            .map(|chunk| chunk.to_vec())
            .collect();

        if groups.is_empty() {
            tracing::info!(
                config_id = config.id,
                from = %start_timestamp,
                until = %end_timestamp,
                "No records to export in time range"
            );
            return Ok(Vec::new());
        }

        if let Some(last) = groups.last_mut() {
            if last.len() < self.settings.min_records {
                padding::ensure_min_exposures(
                    last,
                    &config.region,
                    self.settings.min_records,
                    self.settings.padding_range,
                );
            }
        }

        let signature_infos = config.active_signature_infos(file_date);

        let batch_size = groups.len() as i32;
        let mut object_names = Vec::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            let batch_num = i as i32 + 1;
            let object_name = format!(
                "{}/{}/{}-{}-{}{}",
                config.filename_root,
                file_date.timestamp(),
                file_prefix,
                interval_number,
                batch_num,
                FILENAME_SUFFIX
            );
            let data = self
                .marshaller
                .marshal_export_file(
                    &config.region,
                    start_timestamp,
                    end_timestamp,
                    group,
                    batch_num,
                    batch_size,
                    &signature_infos,
                )
                .await?;
            self.blobstore
                .put(&config.bucket_name, &object_name, &data)
                .await?;
            tracing::info!(
                config_id = config.id,
                object_name = %object_name,
                keys = group.len(),
                "Wrote export file"
            );
            object_names.push(object_name);
        }

        for object_name in &object_names {
            self.file_repository
                .save(ExportFile::created(
                    object_name,
                    &config.bucket_name,
                    config.id,
                    &config.region,
                    file_date.timestamp(),
                ))
                .await?;
        }

        Ok(object_names
            .iter()
            .map(|name| format!("/{}/{}", config.bucket_name, name))
            .collect())
    }
}

/// Restricts a pool to exposures whose interval number lies in `[start, end)`.
fn filter_by_interval(exposures: &[Exposure], start: i64, end: i64) -> Vec<Exposure> {
    exposures
        .iter()
        .filter(|e| {
            e.interval_number
                .map_or(false, |n| i64::from(n) >= start && i64::from(n) < end)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exposure::DiagnosisType;

    fn exposure(interval_number: Option<i32>) -> Exposure {
        Exposure {
            exposure_key: Exposure::encode_key(&[0x01; 16]),
            transmission_risk: 3,
            interval_number,
            interval_count: Some(144),
            region: "AT".to_string(),
            diagnosis_type: DiagnosisType::RedWarning,
        }
    }

    #[test]
    fn test_filter_by_interval_is_half_open() {
        let pool = vec![
            exposure(Some(99)),
            exposure(Some(100)),
            exposure(Some(199)),
            exposure(Some(200)),
        ];
        let filtered = filter_by_interval(&pool, 100, 200);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].interval_number, Some(100));
        assert_eq!(filtered[1].interval_number, Some(199));
    }

    #[test]
    fn test_filter_drops_missing_interval_numbers() {
        let pool = vec![exposure(None), exposure(Some(150))];
        let filtered = filter_by_interval(&pool, 100, 200);
        assert_eq!(filtered.len(), 1);
    }
}
