//! Chain registry: per-chain metadata describing how addresses are derived.

use crate::error::{Result, StoreError};
use hd_bip32::ExtendedPublicKey;
use std::collections::HashMap;

/// A 256-bit opaque identifier: the hash of a chain's master extended
/// public key. Equality of ChainIDs implies equality of seeds, an invariant
/// enforced by the caller that computes the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId([u8; 32]);

impl ChainId {
    /// Wraps a raw 32-byte chain id.
    pub fn new(bytes: [u8; 32]) -> Self {
        ChainId(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Per-chain metadata: the keypath template and the external/internal
/// extended public key roots used for public-only (`usePubCKD`) derivation.
#[derive(Debug, Clone)]
pub struct HDChain {
    /// Wire format version.
    pub version: i32,
    /// Creation time in seconds since the epoch, 0 if unknown.
    pub create_time: i64,
    /// The chain's identifier.
    pub chain_id: ChainId,
    /// The path template, e.g. `"m/44'/0'/0'/c"`.
    pub keypath_template: String,
    /// The external (receive) root extended public key. `None` unless
    /// `use_pub_ckd` is set — the invariant this type enforces at
    /// construction.
    pub external_ext_pub_key: Option<ExtendedPublicKey>,
    /// The internal (change) root extended public key, if one exists.
    /// Only meaningful when `use_pub_ckd` is set.
    pub internal_ext_pub_key: Option<ExtendedPublicKey>,
    /// When true, address derivation uses public CKD from the stored roots
    /// instead of re-deriving from the seed.
    pub use_pub_ckd: bool,
}

impl HDChain {
    /// Builds a new `HDChain`, enforcing that a non-empty `keypath_template`
    /// is required regardless of mode, and that `external_ext_pub_key` is
    /// present exactly when `use_pub_ckd` is set.
    pub fn new(
        version: i32,
        create_time: i64,
        chain_id: ChainId,
        keypath_template: String,
        external_ext_pub_key: Option<ExtendedPublicKey>,
        internal_ext_pub_key: Option<ExtendedPublicKey>,
        use_pub_ckd: bool,
    ) -> Result<Self> {
        if keypath_template.is_empty() {
            return Err(StoreError::InvalidKeyPath {
                reason: "keypath template must be non-empty".to_string(),
            });
        }
        if use_pub_ckd && external_ext_pub_key.is_none() {
            return Err(StoreError::InvalidKeyPath {
                reason: "usePubCKD requires a valid external extended public key".to_string(),
            });
        }
        Ok(HDChain {
            version,
            create_time,
            chain_id,
            keypath_template,
            external_ext_pub_key,
            internal_ext_pub_key,
            use_pub_ckd,
        })
    }
}

/// An upsertable registry of [`HDChain`] records keyed by [`ChainId`].
#[derive(Default)]
pub struct ChainRegistry {
    chains: HashMap<ChainId, HDChain>,
}

impl ChainRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ChainRegistry {
            chains: HashMap::new(),
        }
    }

    /// Inserts or replaces the chain under its own id.
    pub fn add_chain(&mut self, chain: HDChain) {
        self.chains.insert(chain.chain_id, chain);
    }

    /// Returns a copy of the chain registered under `chain_id`.
    pub fn get_chain(&self, chain_id: ChainId) -> Result<HDChain> {
        self.chains
            .get(&chain_id)
            .cloned()
            .ok_or(StoreError::UnknownChain)
    }
}
