//! Export command implementation
//!
//! Wires the coordinator to the filesystem blobstore, the P-256 signer,
//! and the file-seeded in-memory repositories, then runs exactly one tick.

use crate::adapters::blobstore::FilesystemBlobstore;
use crate::adapters::lock::MemoryLockService;
use crate::adapters::repository::{
    MemoryExportConfigRepository, MemoryExportFileRepository, MemoryExposureRepository,
};
use crate::adapters::signer::P256Signer;
use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Returns the process exit code: 0 on success, 1 when the tick failed.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;

        let blobstore = Arc::new(FilesystemBlobstore::new(config.blobstore.root.clone()));
        let signer = Arc::new(P256Signer::from_pem_file(&config.signer.key_path)?);
        let lock_service = Arc::new(MemoryLockService::new());

        let exposure_repository = match &config.repository.exposures_path {
            Some(path) => Arc::new(MemoryExposureRepository::from_json_file(path)?),
            None => Arc::new(MemoryExposureRepository::default()),
        };
        let config_repository = Arc::new(MemoryExportConfigRepository::new(
            config.configs.iter().map(|entry| entry.to_domain()).collect(),
        ));
        let file_repository = Arc::new(MemoryExportFileRepository::new());

        let coordinator = ExportCoordinator::new(
            config.export.clone(),
            exposure_repository,
            config_repository,
            file_repository.clone(),
            lock_service,
            blobstore,
            signer,
        );

        match coordinator.run_tick().await {
            Ok(()) => {
                tracing::info!(
                    files_recorded = file_repository.saved().len(),
                    "Export tick completed"
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export tick failed");
                Ok(1)
            }
        }
    }
}
