//! Address and public key encodings: Bech32, Cosmos pubkey JSON

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protobuf type URL of a Cosmos secp256k1 public key
pub const SECP256K1_PUBKEY_TYPE: &str = "/cosmos.crypto.secp256k1.PubKey";

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Bech32 encoding failed: {0}")]
    Bech32Error(String),
    #[error("Unexpected public key type '{0}'")]
    UnexpectedKeyType(String),
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bech32 encode an account payload (no witness version, Cosmos style)
pub fn bech32_encode(hrp: &str, data: &[u8]) -> Result<String, EncodingError> {
    use bech32::{Bech32, Hrp};

    let hrp = Hrp::parse(hrp).map_err(|e| EncodingError::Bech32Error(e.to_string()))?;

    bech32::encode::<Bech32>(hrp, data)
        .map_err(|e| EncodingError::Bech32Error(e.to_string()))
}

/// Bech32 decode, returns (hrp, payload)
pub fn bech32_decode(address: &str) -> Result<(String, Vec<u8>), EncodingError> {
    let (hrp, data) = bech32::decode(address)
        .map_err(|e| EncodingError::Bech32Error(e.to_string()))?;
    Ok((hrp.to_string(), data))
}

#[derive(Debug, Serialize, Deserialize)]
struct CosmosPubKey {
    #[serde(rename = "@type")]
    type_url: String,
    key: String,
}

/// Render a compressed secp256k1 key as the Cosmos SDK JSON object
pub fn cosmos_pubkey_json(public_key: &[u8; 33]) -> Result<String, EncodingError> {
    let wrapped = CosmosPubKey {
        type_url: SECP256K1_PUBKEY_TYPE.to_string(),
        key: STANDARD.encode(public_key),
    };
    Ok(serde_json::to_string(&wrapped)?)
}

/// Parse a public key given either as Cosmos JSON or as raw hex
pub fn parse_pubkey(input: &str) -> Result<[u8; 33], EncodingError> {
    let input = input.trim();

    let bytes = if input.starts_with('{') {
        let wrapped: CosmosPubKey = serde_json::from_str(input)?;
        if wrapped.type_url != SECP256K1_PUBKEY_TYPE {
            return Err(EncodingError::UnexpectedKeyType(wrapped.type_url));
        }
        STANDARD.decode(wrapped.key)?
    } else {
        hex::decode(input)?
    };

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength { expected: 33, actual: bytes.len() })
}
