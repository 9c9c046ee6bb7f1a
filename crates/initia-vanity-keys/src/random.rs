//! Random-key strategy

use initia_vanity_crypto::Secp256k1Keypair;

use crate::traits::{DeriveError, DerivedKey, Deriver};

/// Fresh random secp256k1 keypair per call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDeriver;

impl Deriver for RandomDeriver {
    fn derive(&self) -> Result<DerivedKey, DeriveError> {
        let keypair = Secp256k1Keypair::generate();
        crate::account_from_keypair(&keypair)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_generation() {
        let key = RandomDeriver.derive().unwrap();
        assert!(key.address.starts_with("init1"));
        // 5 (hrp + separator) + 32 (payload) + 6 (checksum)
        assert_eq!(key.address.len(), 43);
        assert_eq!(key.private_key_hex.len(), 64);
        assert!(key.mnemonic.is_none());
        assert!(key.derivation_path.is_none());
    }

    #[test]
    fn test_random_keys_differ() {
        let a = RandomDeriver.derive().unwrap();
        let b = RandomDeriver.derive().unwrap();
        assert_ne!(a.private_key_hex, b.private_key_hex);
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_public_key_json() {
        let key = RandomDeriver.derive().unwrap();
        let value: serde_json::Value = serde_json::from_str(&key.public_key).unwrap();
        assert_eq!(value["@type"], "/cosmos.crypto.secp256k1.PubKey");
        assert!(value["key"].is_string());
    }

    #[test]
    fn test_serialized_field_names() {
        let key = RandomDeriver.derive().unwrap();
        let value = serde_json::to_value(&key).unwrap();
        assert!(value.get("private_key").is_some());
        assert!(value.get("mnemonic").is_none());
        assert!(value.get("derivation_path").is_none());
    }
}
