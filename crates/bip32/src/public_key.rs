//! Public key implementation for BIP32 hierarchical deterministic wallets.

use crate::{Error, PrivateKey, Result};
use secp256k1::PublicKey as Secp256k1PublicKey;

/// A 33-byte compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: Secp256k1PublicKey,
}

impl PublicKey {
    /// Length of a compressed public key in bytes.
    pub const LENGTH: usize = 33;

    /// Wraps a secp256k1 public key.
    pub fn new(inner: Secp256k1PublicKey) -> Self {
        PublicKey { inner }
    }

    /// Parses a compressed (33-byte) public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = Secp256k1PublicKey::from_slice(bytes).map_err(|e| Error::InvalidPublicKey {
            reason: format!("invalid secp256k1 public key: {}", e),
        })?;
        Ok(PublicKey { inner })
    }

    /// Derives the public key corresponding to a private key.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        PublicKey {
            inner: private_key.public_key(),
        }
    }

    /// Returns the 33-byte compressed encoding.
    pub fn to_bytes(&self) -> [u8; 33] {
        self.inner.serialize()
    }

    /// Returns a reference to the underlying secp256k1 public key.
    pub fn inner(&self) -> &Secp256k1PublicKey {
        &self.inner
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        PublicKey::from_bytes(bytes)
    }
}
