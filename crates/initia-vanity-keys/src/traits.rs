//! Deriver trait and types

use initia_vanity_crypto::EncodingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("Address encoding failed: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

impl DeriveError {
    /// Whether the error invalidates the whole search rather than one attempt
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeriveError::InvalidMnemonic(_))
    }
}

/// A derived account with its keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKey {
    /// The bech32 address string
    pub address: String,
    /// Private key in hex format (64 chars)
    #[serde(rename = "private_key")]
    pub private_key_hex: String,
    /// Public key as Cosmos SDK JSON
    pub public_key: String,
    /// BIP-39 phrase, mnemonic strategy only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    /// HD path the key was derived at, mnemonic strategy only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation_path: Option<String>,
}

/// Key derivation strategy run once per search attempt
///
/// Implementations hold no mutable state; every call draws its own randomness
/// so the same instance can be shared by all workers.
pub trait Deriver: Send + Sync {
    /// Produce one candidate account
    fn derive(&self) -> Result<DerivedKey, DeriveError>;

    /// True when every call yields the same account
    fn is_deterministic(&self) -> bool {
        false
    }

    /// Short strategy name for logs
    fn name(&self) -> &'static str;
}
