// tekport - Exposure Key Export Engine
// Copyright (c) 2025 tekport Contributors
// Licensed under the MIT License

//! # tekport - Exposure Key Export Engine
//!
//! tekport is the server-side export engine of an exposure-notification
//! backend. On a fixed cadence it reads recently-published Temporary
//! Exposure Keys, cuts them into daily, medium-window, and large-window
//! batches, pads each batch with synthetic keys so real case counts cannot
//! be inferred from archive size, signs every archive with ECDSA P-256,
//! and publishes the archives plus an index manifest to an object store.
//! A distributed lock ensures only one worker runs a given export cycle.
//!
//! ## Architecture
//!
//! tekport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline (coordination, padding, marshalling)
//! - [`adapters`] - External integrations (blobstore, signer, lock, repositories)
//! - [`domain`] - Core domain types and models
//! - [`proto`] - Exposure Notifications v1 wire messages
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tekport::adapters::blobstore::FilesystemBlobstore;
//! use tekport::adapters::lock::MemoryLockService;
//! use tekport::adapters::repository::{
//!     MemoryExportConfigRepository, MemoryExportFileRepository, MemoryExposureRepository,
//! };
//! use tekport::adapters::signer::P256Signer;
//! use tekport::config::load_config;
//! use tekport::core::export::ExportCoordinator;
//! use tekport::domain::TekportError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TekportError> {
//!     let config = load_config("tekport.toml")?;
//!
//!     let coordinator = ExportCoordinator::new(
//!         config.export.clone(),
//!         Arc::new(MemoryExposureRepository::default()),
//!         Arc::new(MemoryExportConfigRepository::new(
//!             config.configs.iter().map(|c| c.to_domain()).collect(),
//!         )),
//!         Arc::new(MemoryExportFileRepository::new()),
//!         Arc::new(MemoryLockService::new()),
//!         Arc::new(FilesystemBlobstore::new(config.blobstore.root.clone())),
//!         Arc::new(P256Signer::from_pem_file(&config.signer.key_path)?),
//!     );
//!
//!     // One tick: lock, export every due config, publish indexes, unlock.
//!     coordinator.run_tick().await
//! }
//! ```
//!
//! ## Archive format
//!
//! Every batch becomes one ZIP archive with exactly two entries:
//! `export.bin` (the 16-byte ASCII header `"EK Export v1    "` followed by
//! a `TemporaryExposureKeyExport` protobuf) and `export.sig` (a
//! `TEKSignatureList` protobuf). The signature covers the whole
//! `export.bin` byte stream, header included. Clients poll the stable
//! index alias `{filename_root}/index.json`, which is atomically replaced
//! as the last step of each run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod proto;
