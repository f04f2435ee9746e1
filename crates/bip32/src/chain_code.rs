//! Chain code implementation for BIP32 hierarchical deterministic wallets.
//!
//! The chain code is 32 bytes of additional entropy, separate from the key
//! itself, that makes child key derivation possible without exposing the
//! relationship between sibling keys.

use crate::{Error, Result};
use zeroize::Zeroize;

/// 32 bytes of entropy used alongside a key to derive child keys.
///
/// The chain code is not secret in the same sense as a private key (an
/// extended *public* key carries the same chain code as its private
/// counterpart), but it is still zeroized on drop since in practice it is
/// almost always held alongside a private key in the same struct.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    /// Length of a chain code in bytes.
    pub const LENGTH: usize = 32;

    /// Builds a chain code from a byte slice, which must be exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LENGTH {
            return Err(Error::InvalidChainCode {
                reason: format!("chain code must be {} bytes, got {}", Self::LENGTH, bytes.len()),
            });
        }
        let mut inner = [0u8; 32];
        inner.copy_from_slice(bytes);
        Ok(ChainCode(inner))
    }

    /// Builds a chain code from an owned 32-byte array.
    pub fn from_array(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }

    /// Returns the chain code bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainCode({})", hex::encode(self.0))
    }
}
