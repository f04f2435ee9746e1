//! Error types for BIP32 key primitives.

use thiserror::Error;

/// Errors produced by [`crate`] key types and derivation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A private key byte string failed secp256k1 validation.
    #[error("invalid private key: {reason}")]
    InvalidPrivateKey {
        /// Human-readable cause.
        reason: String,
    },

    /// A public key byte string failed secp256k1 validation.
    #[error("invalid public key: {reason}")]
    InvalidPublicKey {
        /// Human-readable cause.
        reason: String,
    },

    /// A chain code byte string had the wrong length.
    #[error("invalid chain code: {reason}")]
    InvalidChainCode {
        /// Human-readable cause.
        reason: String,
    },

    /// A seed was shorter or longer than BIP32 permits for master key
    /// generation (16 to 64 bytes).
    #[error("invalid seed length: {length} bytes (must be 16-64)")]
    InvalidSeedLength {
        /// The offending length.
        length: usize,
    },

    /// Tweak addition produced a private key of zero or >= curve order.
    #[error("key overflow during tweak addition")]
    KeyOverflow,

    /// A derivation step yielded an out-of-range scalar or the point at
    /// infinity. Per BIP32 this has probability < 2^-127 and is treated as
    /// an invariant violation rather than something callers retry.
    #[error("derivation failed: {reason}")]
    DerivationFailed {
        /// Human-readable cause.
        reason: String,
    },

    /// A hardened child was requested from an extended *public* key, which
    /// is mathematically impossible (hardened CKD requires the private key).
    #[error("hardened derivation requires a private key")]
    HardenedDerivationUnavailable,

    /// The derivation tree depth field (one byte) would overflow.
    #[error("derivation depth exceeds 255")]
    DepthExceeded,

    /// A 74-byte raw extended-key encoding failed to decode.
    #[error("invalid extended key encoding: {reason}")]
    ExtKeyDecodingInvalid {
        /// Human-readable cause.
        reason: String,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
