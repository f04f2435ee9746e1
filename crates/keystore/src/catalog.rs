//! PubKey catalog: maps a key hash to a stored HD public key record.

use crate::chain::ChainId;
use crate::error::{Result, StoreError};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A 160-bit hash of a compressed public key: `RIPEMD160(SHA256(pubkey))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId([u8; 20]);

impl KeyId {
    /// Computes the key id (hash160) of a compressed public key.
    pub fn from_pubkey(pubkey: &[u8]) -> Self {
        let sha256 = Sha256::digest(pubkey);
        let ripemd160 = Ripemd160::digest(sha256);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&ripemd160);
        KeyId(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

/// A derived public key record, as produced by
/// [`crate::store::HDKeyStore::derive_hd_pub_key_at_index`] and persisted
/// via [`crate::store::HDKeyStore::load_hd_pub_key`].
///
/// Value type: cheap to copy/clone, never mutated once loaded.
#[derive(Debug, Clone)]
pub struct HDPubKey {
    /// Wire format version.
    pub version: i32,
    /// The 33-byte compressed public key.
    pub pubkey: [u8; 33],
    /// The final-segment child index, always < 2^31.
    pub n_child: u32,
    /// The chain this key was derived from.
    pub chain_id: ChainId,
    /// The fully materialized derivation path that produced this key.
    pub keypath: String,
    /// True for a change (internal) address, false for receive (external).
    pub internal: bool,
}

impl HDPubKey {
    /// Computes this record's catalog key.
    pub fn key_id(&self) -> KeyId {
        KeyId::from_pubkey(&self.pubkey)
    }
}

/// Maps [`KeyId`] to [`HDPubKey`]. Invariant: every key equals
/// `hash160` of its record's pubkey — enforced by only ever inserting
/// through [`PubKeyCatalog::load`].
#[derive(Default)]
pub struct PubKeyCatalog {
    entries: HashMap<KeyId, HDPubKey>,
}

impl PubKeyCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        PubKeyCatalog {
            entries: HashMap::new(),
        }
    }

    /// Inserts `record` under `hash160(record.pubkey)`.
    pub fn load(&mut self, record: HDPubKey) {
        self.entries.insert(record.key_id(), record);
    }

    /// Returns a copy of the record stored under `key_id`.
    pub fn get(&self, key_id: KeyId) -> Result<HDPubKey> {
        self.entries.get(&key_id).cloned().ok_or(StoreError::UnknownKey)
    }

    /// True if a record exists under `key_id`.
    pub fn contains(&self, key_id: KeyId) -> bool {
        self.entries.contains_key(&key_id)
    }

    /// Returns the smallest index in `[0, 2^31)` not used by any record
    /// matching `(chain_id, internal)`.
    ///
    /// Implemented as "collect matching `n_child` values, sort, return the
    /// first gap" (`O(N log N)`), not a naive `O(N * 2^31)` scan.
    pub fn get_next_child_index(&self, chain_id: ChainId, internal: bool) -> u32 {
        let mut used: Vec<u32> = self
            .entries
            .values()
            .filter(|r| r.chain_id == chain_id && r.internal == internal)
            .map(|r| r.n_child)
            .collect();
        used.sort_unstable();
        used.dedup();

        let mut candidate = 0u32;
        for index in used {
            if index == candidate {
                candidate += 1;
            } else if index > candidate {
                break;
            }
        }
        candidate
    }
}
