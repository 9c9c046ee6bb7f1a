//! secp256k1 keypairs for Cosmos-style accounts

use k256::{
    elliptic_curve::{rand_core::OsRng, sec1::ToEncodedPoint},
    PublicKey, SecretKey,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Secp256k1Error {
    #[error("Invalid private key")]
    InvalidPrivateKey,
}

/// A secp256k1 keypair
#[derive(Clone)]
pub struct Secp256k1Keypair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl Secp256k1Keypair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let secret_key = SecretKey::random(&mut OsRng);
        let public_key = secret_key.public_key();
        Self { secret_key, public_key }
    }

    /// Create from raw 32-byte private key
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Secp256k1Error> {
        let secret_key = SecretKey::from_bytes(bytes.into())
            .map_err(|_| Secp256k1Error::InvalidPrivateKey)?;
        let public_key = secret_key.public_key();
        Ok(Self { secret_key, public_key })
    }

    /// Get the private key as bytes
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.secret_key.to_bytes().into()
    }

    /// Get the compressed public key (33 bytes: 0x02/0x03 || x)
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.public_key.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }
}

impl std::fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Keypair")
            .field("public_key", &hex::encode(self.public_key_compressed()))
            .finish_non_exhaustive()
    }
}
