//! Initia Vanity Crypto Primitives
//!
//! Low-level cryptographic operations for Initia address derivation.

pub mod secp256k1;
pub mod hash;
pub mod encoding;

pub use self::secp256k1::{Secp256k1Error, Secp256k1Keypair};
pub use self::encoding::EncodingError;

// Re-export dependencies for use by other crates
pub use hex;
