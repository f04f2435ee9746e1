//! Seed vault: holds master seeds, transitioning one-way from plaintext to
//! encrypted storage.

use crate::chain::ChainId;
use crate::collaborators::{CipherBlob, SeedEncryptor};
use crate::error::{Result, StoreError};
use crate::seed::MasterSeed;
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Arc;

/// The seed vault's disjoint state. Modeled as an enum rather than two
/// parallel maps plus a runtime flag: the type system enforces "a chain id
/// never appears in both maps" instead of an assertion checked at runtime.
pub enum SeedVault {
    /// Seeds held in cleartext, keyed by chain id.
    Plaintext(HashMap<ChainId, MasterSeed>),
    /// Seeds held as opaque ciphertext, keyed by chain id. Decryption is
    /// delegated to the injected [`SeedEncryptor`].
    Encrypted(HashMap<ChainId, CipherBlob>),
}

impl SeedVault {
    /// Creates an empty vault in the Plaintext state.
    pub fn new() -> Self {
        SeedVault::Plaintext(HashMap::new())
    }

    /// Inserts `seed` for `chain_id`. If the vault is Encrypted, `seed` is
    /// wrapped via `encryptor` before storage. Overwrite-on-conflict is
    /// permitted.
    pub fn add_master_seed(
        &mut self,
        chain_id: ChainId,
        seed: MasterSeed,
        encryptor: &dyn SeedEncryptor,
    ) -> Result<()> {
        match self {
            SeedVault::Plaintext(map) => {
                map.insert(chain_id, seed);
                Ok(())
            }
            SeedVault::Encrypted(map) => {
                let blob = encryptor.encrypt_seed(&seed, chain_id)?;
                map.insert(chain_id, blob);
                Ok(())
            }
        }
    }

    /// Unconditionally inserts `blob` into the crypted map, used during
    /// wallet load when the blob is already wrapped. Only meaningful once
    /// the vault has transitioned to Encrypted.
    pub fn add_crypted_master_seed(&mut self, chain_id: ChainId, blob: CipherBlob) -> Result<()> {
        match self {
            SeedVault::Plaintext(_) => Err(StoreError::NotCrypted),
            SeedVault::Encrypted(map) => {
                map.insert(chain_id, blob);
                Ok(())
            }
        }
    }

    /// Returns the plaintext seed for `chain_id`.
    ///
    /// In the Plaintext state, returns the stored seed directly. In the
    /// Encrypted state, decrypts via `encryptor`, failing with
    /// [`StoreError::Locked`] if the collaborator cannot currently decrypt.
    pub fn get_master_seed(
        &self,
        chain_id: ChainId,
        encryptor: &dyn SeedEncryptor,
    ) -> Result<MasterSeed> {
        match self {
            SeedVault::Plaintext(map) => {
                map.get(&chain_id).cloned().ok_or(StoreError::UnknownChain)
            }
            SeedVault::Encrypted(map) => {
                let blob = map.get(&chain_id).ok_or(StoreError::UnknownChain)?;
                if !encryptor.is_crypted() {
                    return Err(StoreError::Locked);
                }
                encryptor.decrypt_seed(blob, chain_id).map_err(|_| StoreError::Locked)
            }
        }
    }

    /// Returns the encrypted blob stored for `chain_id`. Fails with
    /// [`StoreError::NotCrypted`] unless the vault is Encrypted.
    pub fn get_crypted_master_seed(&self, chain_id: ChainId) -> Result<CipherBlob> {
        match self {
            SeedVault::Plaintext(_) => Err(StoreError::NotCrypted),
            SeedVault::Encrypted(map) => {
                map.get(&chain_id).cloned().ok_or(StoreError::UnknownChain)
            }
        }
    }

    /// Transitions Plaintext to Encrypted, wrapping every stored seed via
    /// `encryptor`.
    ///
    /// Never loses a seed: entries that fail to encrypt stay in the
    /// plaintext map, and the vault only commits to Encrypted once every
    /// entry has wrapped successfully. A partial failure leaves the vault
    /// in the Plaintext state holding exactly the seeds that did not
    /// encrypt, so re-invocation retries only those. Seeds that succeeded
    /// during a failed pass are re-wrapped on retry rather than persisted
    /// mid-transition, since the vault has exactly two states and no
    /// in-between one to hold them.
    pub fn encrypt_seeds(&mut self, encryptor: &dyn SeedEncryptor) -> Result<()> {
        let plain = match self {
            SeedVault::Encrypted(_) => return Ok(()),
            SeedVault::Plaintext(map) => map,
        };

        let mut crypted = HashMap::with_capacity(plain.len());
        let mut remaining = HashMap::new();
        let mut first_err = None;

        for (chain_id, seed) in plain.drain() {
            match encryptor.encrypt_seed(&seed, chain_id) {
                Ok(blob) => {
                    crypted.insert(chain_id, blob);
                }
                Err(err) => {
                    remaining.insert(chain_id, seed);
                    first_err.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_err {
            *plain = remaining;
            return Err(err);
        }

        *self = SeedVault::Encrypted(crypted);
        Ok(())
    }

    /// Enumerates the chain ids present in whichever map is authoritative
    /// for the current state.
    pub fn available_chain_ids(&self) -> Vec<ChainId> {
        match self {
            SeedVault::Plaintext(map) => map.keys().copied().collect(),
            SeedVault::Encrypted(map) => map.keys().copied().collect(),
        }
    }

    /// True if the vault has transitioned to the Encrypted state.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, SeedVault::Encrypted(_))
    }
}

impl Default for SeedVault {
    fn default() -> Self {
        SeedVault::new()
    }
}

/// A trivial, non-cryptographic XOR "cipher" used only to exercise the
/// vault's state machine in tests. Never use outside `#[cfg(test)]`.
#[cfg(test)]
pub(crate) struct XorTestEncryptor {
    pub key: Vec<u8>,
    pub unlocked: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl XorTestEncryptor {
    pub fn new(key: Vec<u8>) -> Arc<Self> {
        Arc::new(XorTestEncryptor {
            key,
            unlocked: std::sync::atomic::AtomicBool::new(true),
        })
    }

    pub fn lock(&self) {
        self.unlocked.store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn xor(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .enumerate()
            .map(|(i, b)| b ^ self.key[i % self.key.len()])
            .collect()
    }
}

#[cfg(test)]
impl SeedEncryptor for XorTestEncryptor {
    fn is_crypted(&self) -> bool {
        self.unlocked.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn encrypt_seed(&self, seed: &MasterSeed, _chain_id: ChainId) -> Result<CipherBlob> {
        Ok(CipherBlob::new(self.xor(seed.as_bytes())))
    }

    fn decrypt_seed(&self, blob: &CipherBlob, _chain_id: ChainId) -> Result<MasterSeed> {
        if !self.is_crypted() {
            return Err(StoreError::Locked);
        }
        Ok(MasterSeed::new(self.xor(blob.as_bytes())))
    }
}
