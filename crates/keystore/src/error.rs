//! Error types for the HD key store facade.

use thiserror::Error;

/// Errors produced by [`crate::store::HDKeyStore`] and its collaborating
/// modules.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A keypath template or materialized keypath failed to parse.
    #[error("invalid key path: {reason}")]
    InvalidKeyPath {
        /// Human-readable cause.
        reason: String,
    },

    /// No chain is registered under the given chain id.
    #[error("unknown chain")]
    UnknownChain,

    /// No catalog entry exists for the given key id.
    #[error("unknown key")]
    UnknownKey,

    /// A requested child index is >= 2^31.
    #[error("child index exhausted (>= 2^31)")]
    IndexExhausted,

    /// The seed vault is encrypted and currently locked.
    #[error("seed vault is locked")]
    Locked,

    /// A crypted-only operation was attempted while the vault is plaintext.
    #[error("seed vault is not encrypted")]
    NotCrypted,

    /// BIP32 derivation failed (astronomically rare for valid inputs).
    #[error("derivation failed: {reason}")]
    DerivationFailed {
        /// Human-readable cause.
        reason: String,
    },

    /// A 74-byte seed failed to decode as an extended private key.
    #[error("seed encoding invalid: {reason}")]
    SeedEncodingInvalid {
        /// Human-readable cause.
        reason: String,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<hd_bip32::Error> for StoreError {
    fn from(err: hd_bip32::Error) -> Self {
        match err {
            hd_bip32::Error::InvalidSeedLength { .. } => StoreError::SeedEncodingInvalid {
                reason: err.to_string(),
            },
            hd_bip32::Error::ExtKeyDecodingInvalid { .. } => StoreError::SeedEncodingInvalid {
                reason: err.to_string(),
            },
            hd_bip32::Error::DepthExceeded
            | hd_bip32::Error::HardenedDerivationUnavailable
            | hd_bip32::Error::DerivationFailed { .. }
            | hd_bip32::Error::KeyOverflow
            | hd_bip32::Error::InvalidPrivateKey { .. }
            | hd_bip32::Error::InvalidPublicKey { .. }
            | hd_bip32::Error::InvalidChainCode { .. } => StoreError::DerivationFailed {
                reason: err.to_string(),
            },
        }
    }
}
