//! Exposure Notifications v1 wire messages
//!
//! Hand-written prost definitions for the archive payloads. Tags and wire
//! types match the published Exposure Notifications v1 schema; deployed
//! clients verify against exactly this encoding, so the shapes here are
//! load-bearing.

/// Top-level payload of `export.bin` (after the 16-byte ASCII header)
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKeyExport {
    /// Window start, epoch seconds UTC
    #[prost(fixed64, optional, tag = "1")]
    pub start_timestamp: Option<u64>,

    /// Window end, epoch seconds UTC
    #[prost(fixed64, optional, tag = "2")]
    pub end_timestamp: Option<u64>,

    /// Region the keys were published for
    #[prost(string, optional, tag = "3")]
    pub region: Option<String>,

    /// 1-based index of this archive within its batch set
    #[prost(int32, optional, tag = "4")]
    pub batch_num: Option<i32>,

    /// Total number of archives in this batch set
    #[prost(int32, optional, tag = "5")]
    pub batch_size: Option<i32>,

    /// Descriptors of the identities that signed this archive
    #[prost(message, repeated, tag = "6")]
    pub signature_infos: Vec<SignatureInfo>,

    /// The exported keys, sorted by raw key bytes
    #[prost(message, repeated, tag = "7")]
    pub keys: Vec<TemporaryExposureKey>,
}

/// Signing identity descriptor
///
/// Tags 1 and 2 (app bundle / android package) are retired upstream and
/// never emitted.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureInfo {
    /// Key version, present when the identity carries one
    #[prost(string, optional, tag = "3")]
    pub verification_key_version: Option<String>,

    /// Key id, present when the identity carries one
    #[prost(string, optional, tag = "4")]
    pub verification_key_id: Option<String>,

    /// ASN.1 OID of the signature algorithm (ECDSA with SHA-256)
    #[prost(string, optional, tag = "5")]
    pub signature_algorithm: Option<String>,
}

/// One exported key
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKey {
    /// Raw 16-byte key material
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key_data: Option<Vec<u8>>,

    /// Risk level reported at publish time
    #[prost(int32, optional, tag = "2")]
    pub transmission_risk_level: Option<i32>,

    /// Interval the key became active at; omitted when absent on the source
    #[prost(int32, optional, tag = "3")]
    pub rolling_start_interval_number: Option<i32>,

    /// Number of intervals the key was valid for; omitted when absent
    #[prost(int32, optional, tag = "4")]
    pub rolling_period: Option<i32>,
}

/// Payload of `export.sig`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TekSignatureList {
    /// One entry per active signing identity
    #[prost(message, repeated, tag = "1")]
    pub signatures: Vec<TekSignature>,
}

/// One signature entry
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TekSignature {
    /// Copy of the identity descriptor
    #[prost(message, optional, tag = "1")]
    pub signature_info: Option<SignatureInfo>,

    /// 1-based index of the signed archive within its batch set
    #[prost(int32, optional, tag = "2")]
    pub batch_num: Option<i32>,

    /// Total number of archives in the batch set
    #[prost(int32, optional, tag = "3")]
    pub batch_size: Option<i32>,

    /// ECDSA signature over the full `export.bin` byte stream, DER-encoded
    #[prost(bytes = "vec", optional, tag = "4")]
    pub signature: Option<Vec<u8>>,
}
