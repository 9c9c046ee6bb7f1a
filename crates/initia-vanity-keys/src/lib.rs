//! Initia Vanity Key Derivation
//!
//! Trait-based key derivation strategies producing `init1...` accounts.
//! Both strategies use secp256k1 + RIPEMD160(SHA256(pubkey)) + Bech32.

pub mod traits;
pub mod random;
pub mod mnemonic;

pub use traits::{DeriveError, DerivedKey, Deriver};
pub use random::RandomDeriver;
pub use mnemonic::{HdPath, MnemonicDeriver};

use initia_vanity_crypto::{encoding, hash::hash160, hex, Secp256k1Keypair};

/// Human-readable part of every Initia account address
pub const HRP: &str = "init";

/// SLIP-44 coin type shared by Cosmos SDK chains
pub const COSMOS_COIN_TYPE: u32 = 118;

/// Which derivation strategy a search runs with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeriverKind {
    /// Fresh random secp256k1 key per attempt
    #[default]
    Random,
    /// BIP-39 phrase (supplied or fresh per attempt) derived along `path`
    Mnemonic {
        phrase: Option<String>,
        path: HdPath,
    },
}

impl DeriverKind {
    /// Instantiate the strategy, validating a supplied mnemonic up front
    pub fn build(&self) -> Result<Box<dyn Deriver>, DeriveError> {
        match self {
            DeriverKind::Random => Ok(Box::new(RandomDeriver)),
            DeriverKind::Mnemonic { phrase, path } => {
                Ok(Box::new(MnemonicDeriver::new(phrase.as_deref(), *path)?))
            }
        }
    }
}

/// Encode the account fields shared by both strategies
pub(crate) fn account_from_keypair(keypair: &Secp256k1Keypair) -> Result<DerivedKey, DeriveError> {
    let pubkey_compressed = keypair.public_key_compressed();

    // Initia address = bech32("init", RIPEMD160(SHA256(compressed_pubkey)))
    let address = encoding::bech32_encode(HRP, &hash160(&pubkey_compressed))?;

    Ok(DerivedKey {
        address,
        private_key_hex: hex::encode(keypair.private_key_bytes()),
        public_key: encoding::cosmos_pubkey_json(&pubkey_compressed)?,
        mnemonic: None,
        derivation_path: None,
    })
}

/// Derive the account for a raw 32-byte private key
pub fn derive_from_bytes(private_key: &[u8]) -> Result<DerivedKey, DeriveError> {
    let bytes: [u8; 32] = private_key
        .try_into()
        .map_err(|_| DeriveError::Derivation(format!("expected 32 key bytes, got {}", private_key.len())))?;
    let keypair = Secp256k1Keypair::from_bytes(&bytes)
        .map_err(|e| DeriveError::Derivation(e.to_string()))?;
    account_from_keypair(&keypair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_bytes_generator_point() {
        let mut key = [0u8; 32];
        key[31] = 1;
        let derived = derive_from_bytes(&key).unwrap();

        let (hrp, payload) = encoding::bech32_decode(&derived.address).unwrap();
        assert_eq!(hrp, HRP);
        assert_eq!(hex::encode(payload), "751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(
            hex::encode(encoding::parse_pubkey(&derived.public_key).unwrap()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_derive_from_bytes_wrong_length() {
        assert!(matches!(derive_from_bytes(&[1u8; 31]), Err(DeriveError::Derivation(_))));
    }

    #[test]
    fn test_build_random() {
        let deriver = DeriverKind::Random.build().unwrap();
        assert!(!deriver.is_deterministic());
        assert!(deriver.derive().unwrap().address.starts_with("init1"));
    }

    #[test]
    fn test_build_rejects_invalid_mnemonic() {
        let kind = DeriverKind::Mnemonic {
            phrase: Some("invalid mnemonic phrase".to_string()),
            path: HdPath::default(),
        };
        let err = kind.build().err().unwrap();
        assert!(err.is_fatal());
    }
}
