//! ECDSA P-256 signer
//!
//! Signs archive contents with a NIST P-256 key; signatures are emitted in
//! ASN.1 DER form, which is what exposure-notification clients verify.

use crate::adapters::signer::Signer;
use crate::domain::errors::TekportError;
use crate::domain::Result;
use async_trait::async_trait;
use p256::ecdsa::signature::Signer as _;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;
use std::path::Path;

/// Signer backed by a local P-256 private key
#[derive(Debug)]
pub struct P256Signer {
    key: SigningKey,
}

impl P256Signer {
    /// Wraps an existing signing key.
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Loads a PKCS#8 PEM-encoded private key from disk.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or does not
    /// contain a valid P-256 private key.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pem = std::fs::read_to_string(path).map_err(|e| {
            TekportError::Configuration(format!("reading signing key {}: {e}", path.display()))
        })?;
        let key = SigningKey::from_pkcs8_pem(&pem).map_err(|e| {
            TekportError::Configuration(format!("parsing signing key {}: {e}", path.display()))
        })?;
        Ok(Self { key })
    }

    /// The verifying half of the key, for tests and diagnostics.
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.key.verifying_key()
    }
}

#[async_trait]
impl Signer for P256Signer {
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature: Signature = self
            .key
            .try_sign(data)
            .map_err(|e| TekportError::Signer(format!("ECDSA signing failed: {e}")))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::Verifier;

    #[tokio::test]
    async fn test_signature_verifies_as_der() {
        let key = SigningKey::from_slice(&[0x17; 32]).unwrap();
        let signer = P256Signer::new(key);
        let verifying_key = signer.verifying_key();

        let message = b"EK Export v1    payload";
        let der = signer.sign(message).await.unwrap();

        let signature = Signature::from_der(&der).unwrap();
        verifying_key.verify(message, &signature).unwrap();
    }

    #[tokio::test]
    async fn test_signature_does_not_verify_other_message() {
        let key = SigningKey::from_slice(&[0x17; 32]).unwrap();
        let signer = P256Signer::new(key);
        let verifying_key = signer.verifying_key();

        let der = signer.sign(b"message one").await.unwrap();
        let signature = Signature::from_der(&der).unwrap();
        assert!(verifying_key.verify(b"message two", &signature).is_err());
    }

    #[test]
    fn test_from_pem_file_missing() {
        let err = P256Signer::from_pem_file("/nonexistent/key.pem").unwrap_err();
        assert!(matches!(err, TekportError::Configuration(_)));
    }
}
