//! External integrations for tekport.
//!
//! Each adapter is a trait seam plus shipped implementations:
//!
//! - [`blobstore`] - object storage (filesystem, in-memory)
//! - [`signer`] - archive signing (ECDSA P-256)
//! - [`lock`] - distributed export lock (in-process lease)
//! - [`repository`] - exposures, configs, and export file rows (in-memory)

pub mod blobstore;
pub mod lock;
pub mod repository;
pub mod signer;
