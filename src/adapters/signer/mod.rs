//! Archive signing abstraction
//!
//! The export pipeline treats the signer as an opaque capability: bytes in,
//! signature bytes out. Key material never passes through the core.

pub mod p256;

use crate::domain::Result;
use async_trait::async_trait;

pub use self::p256::P256Signer;

/// ASN.1 OID identifying ECDSA with SHA-256, as surfaced in the archive
pub const SIGNATURE_ALGORITHM_OID: &str = "1.2.840.10045.4.3.2";

/// Produces a signature over a byte stream
#[async_trait]
pub trait Signer: Send + Sync {
    /// Signs `data` and returns the signature bytes in the wire form the
    /// archive carries (ASN.1 DER for ECDSA).
    ///
    /// # Errors
    ///
    /// Returns a signer error if the signing operation fails.
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}
