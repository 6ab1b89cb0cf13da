//! Core business logic for tekport.
//!
//! # Modules
//!
//! - [`export`] - the export pipeline: tick coordination, windowed batch
//!   assembly, privacy padding, and archive marshalling
//!
//! # Export workflow
//!
//! One tick:
//!
//! 1. **Lock**: acquire the `export_files` lease; a peer holding it makes
//!    the tick a no-op
//! 2. **Enumerate**: fetch the configs due now
//! 3. **Assemble**: per config, read red and yellow exposures into a pool
//! 4. **Batch**: cut big, medium, and per-day windows; shard by
//!    `max_records`; pad the last shard to the jittered minimum
//! 5. **Marshal**: serialise, sign, and upload each archive
//! 6. **Publish**: upload the run index, then rewrite the stable alias
//! 7. **Unlock**: release the lease with the fencing token

pub mod export;

pub use export::ExportCoordinator;
