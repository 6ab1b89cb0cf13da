//! Export pipeline: coordination, padding, and batch marshalling.

pub mod coordinator;
pub mod marshal;
pub mod padding;

pub use coordinator::{ExportCoordinator, EXPORT_LOCK_ID};
pub use marshal::{BatchMarshaller, EXPORT_BINARY_NAME, EXPORT_FILE_HEADER, EXPORT_SIGNATURE_NAME};
pub use padding::ensure_min_exposures;
