//! Mnemonic/HD strategy: BIP-39 phrase -> seed -> BIP-32 at a Cosmos path

use std::fmt;
use std::str::FromStr;

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use initia_vanity_crypto::Secp256k1Keypair;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::traits::{DeriveError, DerivedKey, Deriver};
use crate::COSMOS_COIN_TYPE;

/// Entropy for freshly generated phrases (24 words)
const ENTROPY_BYTES: usize = 32;

/// Account and address index of `m/44'/118'/{account}'/0/{address_index}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdPath {
    pub account: u32,
    pub address_index: u32,
}

impl HdPath {
    pub const fn new(account: u32, address_index: u32) -> Self {
        Self { account, address_index }
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/44'/{}'/{}'/0/{}",
            COSMOS_COIN_TYPE, self.account, self.address_index
        )
    }
}

/// Derives accounts from BIP-39 mnemonics
///
/// With a supplied phrase every call yields the same account, so that account
/// is derived once at construction. Without one a new 24-word phrase is drawn
/// per call.
#[derive(Debug, Clone)]
pub struct MnemonicDeriver {
    path: HdPath,
    derivation_path: DerivationPath,
    fixed: Option<DerivedKey>,
}

impl MnemonicDeriver {
    pub fn new(supplied: Option<&str>, path: HdPath) -> Result<Self, DeriveError> {
        let derivation_path = DerivationPath::from_str(&path.to_string())
            .map_err(|e| DeriveError::Derivation(format!("path {}: {}", path, e)))?;

        let mut deriver = Self {
            path,
            derivation_path,
            fixed: None,
        };

        if let Some(phrase) = supplied {
            let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
                .map_err(|e| DeriveError::InvalidMnemonic(e.to_string()))?;
            deriver.fixed = Some(deriver.derive_account(&mnemonic)?);
        }

        Ok(deriver)
    }

    /// Path displayed alongside each result
    pub fn path(&self) -> HdPath {
        self.path
    }

    fn derive_account(&self, mnemonic: &Mnemonic) -> Result<DerivedKey, DeriveError> {
        let seed = mnemonic.to_seed("");
        let xprv = XPrv::derive_from_path(seed, &self.derivation_path)
            .map_err(|e| DeriveError::Derivation(e.to_string()))?;

        let secret: [u8; 32] = xprv.private_key().to_bytes().into();
        let keypair = Secp256k1Keypair::from_bytes(&secret)
            .map_err(|e| DeriveError::Derivation(e.to_string()))?;

        let mut key = crate::account_from_keypair(&keypair)?;
        key.mnemonic = Some(mnemonic.to_string());
        key.derivation_path = Some(self.path.to_string());
        Ok(key)
    }
}

impl Deriver for MnemonicDeriver {
    fn derive(&self) -> Result<DerivedKey, DeriveError> {
        if let Some(fixed) = &self.fixed {
            return Ok(fixed.clone());
        }

        let mut entropy = [0u8; ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
            .map_err(|e| DeriveError::Derivation(e.to_string()))?;

        self.derive_account(&mnemonic)
    }

    fn is_deterministic(&self) -> bool {
        self.fixed.is_some()
    }

    fn name(&self) -> &'static str {
        "mnemonic"
    }
}
