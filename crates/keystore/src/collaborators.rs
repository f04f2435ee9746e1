//! External collaborator traits.
//!
//! The facade delegates everything it is not responsible for: non-HD key
//! lookups and the symmetric cipher used to wrap seeds at rest. Neither is
//! implemented in this crate — both are boundaries the host application
//! fills in.

use crate::chain::ChainId;
use crate::error::Result;
use crate::seed::MasterSeed;

/// Opaque ciphertext produced by a [`SeedEncryptor`]. The store never
/// interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherBlob(Vec<u8>);

impl CipherBlob {
    /// Wraps raw ciphertext bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        CipherBlob(bytes)
    }

    /// Returns the raw ciphertext bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Fallback key store for non-HD keys. The facade composes with this via
/// delegation on catalog misses, never inheritance.
pub trait BaseKeyStore: Send + Sync {
    /// True if this store has `key_id`.
    fn have_key(&self, key_id: &[u8; 20]) -> bool;

    /// Returns the private key bytes for `key_id`, if held.
    fn get_key(&self, key_id: &[u8; 20]) -> Option<Vec<u8>>;

    /// Returns the compressed public key bytes for `key_id`, if held.
    fn get_pub_key(&self, key_id: &[u8; 20]) -> Option<[u8; 33]>;
}

/// Symmetric cipher boundary used to wrap/unwrap master seeds. The core
/// treats this as a black box: cipher choice, IV/nonce derivation from
/// `chain_id`, and key management are all the host application's concern.
pub trait SeedEncryptor: Send + Sync {
    /// True if the collaborator currently holds unlocked key material.
    fn is_crypted(&self) -> bool;

    /// Wraps `seed`, binding the ciphertext to `chain_id`.
    fn encrypt_seed(&self, seed: &MasterSeed, chain_id: ChainId) -> Result<CipherBlob>;

    /// Unwraps `blob`, which must have been produced by `encrypt_seed` for
    /// the same `chain_id`.
    fn decrypt_seed(&self, blob: &CipherBlob, chain_id: ChainId) -> Result<MasterSeed>;
}
