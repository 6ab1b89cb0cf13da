//! Batch marshalling
//!
//! Turns one batch of exposures into the archive clients download: a ZIP
//! holding `export.bin` (16-byte ASCII header + `TemporaryExposureKeyExport`
//! protobuf) and `export.sig` (`TEKSignatureList` protobuf). The signature
//! covers the entire `export.bin` byte stream, header included.

use crate::adapters::signer::{Signer, SIGNATURE_ALGORITHM_OID};
use crate::domain::export_config::SignatureInfo;
use crate::domain::exposure::Exposure;
use crate::domain::Result;
use crate::proto;
use chrono::{DateTime, Utc};
use prost::Message;
use std::io::Write as _;
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Fixed 16-byte ASCII header preceding the protobuf in `export.bin`
pub const EXPORT_FILE_HEADER: &[u8; 16] = b"EK Export v1    ";

/// Name of the payload entry inside the archive
pub const EXPORT_BINARY_NAME: &str = "export.bin";

/// Name of the signature entry inside the archive
pub const EXPORT_SIGNATURE_NAME: &str = "export.sig";

/// Marshals batches into signed archives
pub struct BatchMarshaller {
    signer: Arc<dyn Signer>,
}

impl BatchMarshaller {
    /// Creates a marshaller signing with the given capability.
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self { signer }
    }

    /// Converts one batch into the complete archive bytes.
    ///
    /// # Errors
    ///
    /// Fails on undecodable key material, protobuf/ZIP serialisation
    /// problems, or signer failure. All are fatal for the batch.
    #[allow(clippy::too_many_arguments)]
    pub async fn marshal_export_file(
        &self,
        region: &str,
        start_timestamp: DateTime<Utc>,
        end_timestamp: DateTime<Utc>,
        exposures: &[Exposure],
        batch_num: i32,
        batch_size: i32,
        export_signers: &[SignatureInfo],
    ) -> Result<Vec<u8>> {
        let contents = marshal_contents(
            region,
            start_timestamp,
            end_timestamp,
            exposures,
            batch_num,
            batch_size,
            export_signers,
        )?;
        let signature = self
            .marshal_signature(&contents, batch_num, batch_size, export_signers)
            .await?;

        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        writer.start_file(EXPORT_BINARY_NAME, options)?;
        writer.write_all(&contents)?;
        writer.start_file(EXPORT_SIGNATURE_NAME, options)?;
        writer.write_all(&signature)?;

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }

    /// Builds the `export.sig` payload.
    ///
    /// One signer invocation per archive; every listed identity carries the
    /// same signature bytes. Clients accept this, and deployed verifiers
    /// depend on it.
    async fn marshal_signature(
        &self,
        export_contents: &[u8],
        batch_num: i32,
        batch_size: i32,
        export_signers: &[SignatureInfo],
    ) -> Result<Vec<u8>> {
        let signature = self.signer.sign(export_contents).await?;

        let signatures = export_signers
            .iter()
            .map(|si| proto::TekSignature {
                signature_info: Some(proto_signature_info(si)),
                batch_num: Some(batch_num),
                batch_size: Some(batch_size),
                signature: Some(signature.clone()),
            })
            .collect();

        let list = proto::TekSignatureList { signatures };
        let mut output = Vec::with_capacity(list.encoded_len());
        list.encode(&mut output)?;
        Ok(output)
    }
}

/// Builds the `export.bin` payload: header plus serialised key export.
#[allow(clippy::too_many_arguments)]
fn marshal_contents(
    region: &str,
    start_timestamp: DateTime<Utc>,
    end_timestamp: DateTime<Utc>,
    exposures: &[Exposure],
    batch_num: i32,
    batch_size: i32,
    export_signers: &[SignatureInfo],
) -> Result<Vec<u8>> {
    // Canonical order: byte-wise ascending raw key data. Decode once, sort,
    // then emit; a batch with an undecodable key is rejected whole.
    let mut decoded: Vec<(Vec<u8>, &Exposure)> = exposures
        .iter()
        .map(|e| e.key_data().map(|key| (key, e)))
        .collect::<Result<_>>()?;
    decoded.sort_by(|a, b| a.0.cmp(&b.0));

    let keys = decoded
        .into_iter()
        .map(|(key_data, exposure)| proto::TemporaryExposureKey {
            key_data: Some(key_data),
            transmission_risk_level: Some(exposure.transmission_risk),
            rolling_start_interval_number: exposure.interval_number,
            rolling_period: exposure.interval_count,
        })
        .collect();

    let signature_infos = export_signers.iter().map(proto_signature_info).collect();

    let export = proto::TemporaryExposureKeyExport {
        start_timestamp: Some(start_timestamp.timestamp() as u64),
        end_timestamp: Some(end_timestamp.timestamp() as u64),
        region: Some(region.to_string()),
        batch_num: Some(batch_num),
        batch_size: Some(batch_size),
        signature_infos,
        keys,
    };

    let mut output = Vec::with_capacity(EXPORT_FILE_HEADER.len() + export.encoded_len());
    output.extend_from_slice(EXPORT_FILE_HEADER);
    export.encode(&mut output)?;
    Ok(output)
}

fn proto_signature_info(si: &SignatureInfo) -> proto::SignatureInfo {
    proto::SignatureInfo {
        verification_key_version: si
            .signing_key_version
            .clone()
            .filter(|v| !v.is_empty()),
        verification_key_id: si.signing_key_id.clone().filter(|v| !v.is_empty()),
        signature_algorithm: Some(SIGNATURE_ALGORITHM_OID.to_string()),
    }
}
