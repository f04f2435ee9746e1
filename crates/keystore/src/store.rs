//! `HDKeyStore`: the facade composing the chain registry, pubkey catalog,
//! and seed vault under a single mutex.

use crate::catalog::{HDPubKey, KeyId, PubKeyCatalog};
use crate::chain::{ChainId, ChainRegistry, HDChain};
use crate::collaborators::{BaseKeyStore, CipherBlob, SeedEncryptor};
use crate::engine;
use crate::error::{Result, StoreError};
use crate::keypath;
use crate::seed::MasterSeed;
use crate::vault::SeedVault;
use hd_bip32::ChildNumber;
use std::sync::{Arc, Mutex};

/// The mutex-guarded state. All reads and writes to the registry, catalog,
/// and vault go through the one lock `HDKeyStore` holds, matching the
/// single-mutex model the source uses.
struct StoreState {
    chains: ChainRegistry,
    catalog: PubKeyCatalog,
    vault: SeedVault,
}

/// Facade over an HD key store core. Delegates to `base_key_store` for keys
/// it does not itself hold, and to `encryptor` for seed confidentiality.
///
/// Every public method takes the internal mutex for its own duration; no
/// two methods share a lock acquisition. `derive_hd_pub_key_at_index`
/// followed by `load_hd_pub_key` is intentionally two separate calls, so two
/// concurrent callers racing `get_next_child_index` may observe the same
/// index — serializing that is the caller's responsibility.
pub struct HDKeyStore {
    base_key_store: Arc<dyn BaseKeyStore>,
    encryptor: Arc<dyn SeedEncryptor>,
    state: Mutex<StoreState>,
}

impl HDKeyStore {
    /// Builds an empty store, delegating non-HD lookups to `base_key_store`
    /// and seed confidentiality to `encryptor`.
    pub fn new(base_key_store: Arc<dyn BaseKeyStore>, encryptor: Arc<dyn SeedEncryptor>) -> Self {
        HDKeyStore {
            base_key_store,
            encryptor,
            state: Mutex::new(StoreState {
                chains: ChainRegistry::new(),
                catalog: PubKeyCatalog::new(),
                vault: SeedVault::new(),
            }),
        }
    }

    /// Registers or replaces `chain`.
    pub fn add_chain(&self, chain: HDChain) {
        let chain_id = chain.chain_id;
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.chains.add_chain(chain);
        log::debug!("registered HD chain {:?}", chain_id);
    }

    /// Inserts `seed` for `chain_id`, wrapping it first if the vault is
    /// currently encrypted.
    pub fn add_master_seed(&self, chain_id: ChainId, seed: MasterSeed) -> Result<()> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.vault.add_master_seed(chain_id, seed, self.encryptor.as_ref())
    }

    /// Inserts an already-wrapped seed blob for `chain_id`. Only meaningful
    /// once the vault has transitioned to Encrypted.
    pub fn add_crypted_master_seed(&self, chain_id: ChainId, blob: CipherBlob) -> Result<()> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.vault.add_crypted_master_seed(chain_id, blob)
    }

    /// Transitions the vault from Plaintext to Encrypted. A no-op if it is
    /// already Encrypted.
    pub fn encrypt_seeds(&self) -> Result<()> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        if state.vault.is_encrypted() {
            return Ok(());
        }
        let result = state.vault.encrypt_seeds(self.encryptor.as_ref());
        if result.is_ok() {
            log::info!("seed vault transitioned to encrypted state");
        }
        result
    }

    /// Returns the chain ids present in the vault's current map.
    pub fn get_available_chain_ids(&self) -> Vec<ChainId> {
        let state = self.state.lock().expect("store mutex poisoned");
        state.vault.available_chain_ids()
    }

    /// True if `key_id` is catalogued as an HD key, or held by the base key
    /// store.
    pub fn have_key(&self, key_id: KeyId) -> bool {
        let state = self.state.lock().expect("store mutex poisoned");
        state.catalog.contains(key_id) || self.base_key_store.have_key(key_id.as_bytes())
    }

    /// Returns the compressed public key for `key_id`: HD catalog first,
    /// falling through to the base key store.
    pub fn get_pub_key(&self, key_id: KeyId) -> Result<[u8; 33]> {
        let state = self.state.lock().expect("store mutex poisoned");
        match state.catalog.get(key_id) {
            Ok(record) => Ok(record.pubkey),
            Err(StoreError::UnknownKey) => self
                .base_key_store
                .get_pub_key(key_id.as_bytes())
                .ok_or(StoreError::UnknownKey),
            Err(other) => Err(other),
        }
    }

    /// Returns the private key for `key_id` as a 32-byte scalar: if
    /// catalogued as HD, re-derives it from the seed via the stored
    /// keypath; otherwise falls through to the base key store.
    pub fn get_key(&self, key_id: KeyId) -> Result<[u8; 32]> {
        let state = self.state.lock().expect("store mutex poisoned");
        let record = match state.catalog.get(key_id) {
            Ok(record) => record,
            Err(StoreError::UnknownKey) => {
                return self
                    .base_key_store
                    .get_key(key_id.as_bytes())
                    .and_then(|bytes| bytes.try_into().ok())
                    .ok_or(StoreError::UnknownKey);
            }
            Err(other) => return Err(other),
        };

        if state.vault.is_encrypted() && !self.encryptor.is_crypted() {
            log::warn!("get_key denied: seed vault is locked");
            return Err(StoreError::Locked);
        }

        let seed = state.vault.get_master_seed(record.chain_id, self.encryptor.as_ref())?;
        let segments = keypath::parse(&record.keypath)?;
        let key = engine::derive_private_key(seed.as_bytes(), seed.is_encoded_extkey(), &segments)?;
        Ok(key.private_key().to_bytes())
    }

    /// Inserts `record` into the pubkey catalog under `hash160(record.pubkey)`.
    pub fn load_hd_pub_key(&self, record: HDPubKey) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.catalog.load(record);
    }

    /// The smallest `nChild` in `[0, 2^31)` not already used by any
    /// catalogued record matching `(chain_id, internal)`.
    pub fn get_next_child_index(&self, chain_id: ChainId, internal: bool) -> u32 {
        let state = self.state.lock().expect("store mutex poisoned");
        state.catalog.get_next_child_index(chain_id, internal)
    }

    /// Derives the HD public key at `(chain_id, n_index, internal)` without
    /// inserting it into the catalog — the caller follows up with
    /// [`load_hd_pub_key`] to persist it.
    ///
    /// Mode selection:
    /// - If the chain does not use public CKD at all, every address — external
    ///   or internal — derives directly from the seed with a plain
    ///   (non-hardened) final segment, the same shape public CKD would have
    ///   produced.
    /// - If the chain uses public CKD but `internal` is requested and no
    ///   internal root is stored, this falls back to private derivation from
    ///   the seed with a *hardened* final segment. That fallback is kept
    ///   deliberately: the resulting key cannot be rediscovered from an
    ///   extended public key alone, unlike every other key this store
    ///   derives, so callers relying on public-only recovery must be aware a
    ///   chain without an internal root loses that property for its change
    ///   addresses.
    /// - Otherwise, derive via public CKD from the stored external/internal
    ///   root.
    pub fn derive_hd_pub_key_at_index(
        &self,
        chain_id: ChainId,
        n_index: u32,
        internal: bool,
    ) -> Result<HDPubKey> {
        if n_index >= 0x8000_0000 {
            return Err(StoreError::IndexExhausted);
        }

        let state = self.state.lock().expect("store mutex poisoned");
        let chain = state.chains.get_chain(chain_id)?;

        let template = keypath::parse(&chain.keypath_template)?;
        let materialized = keypath::materialize(&template, internal);

        let hardened_fallback =
            chain.use_pub_ckd && internal && chain.internal_ext_pub_key.is_none();
        let derive_from_seed = !chain.use_pub_ckd || hardened_fallback;

        let full = keypath::with_final_index(&materialized, n_index, hardened_fallback);
        let keypath_string = keypath::format(&full)?;

        let pubkey = if derive_from_seed {
            let seed = state.vault.get_master_seed(chain_id, self.encryptor.as_ref())?;
            let key = engine::derive_private_key(seed.as_bytes(), seed.is_encoded_extkey(), &full)?;
            key.to_extended_public_key().public_key().to_bytes()
        } else {
            let root = if internal {
                chain
                    .internal_ext_pub_key
                    .as_ref()
                    .expect("internal root presence checked above")
            } else {
                chain
                    .external_ext_pub_key
                    .as_ref()
                    .expect("use_pub_ckd implies external_ext_pub_key is Some (HDChain::new invariant)")
            };
            let child = root.derive_child(ChildNumber::Normal(n_index))?;
            child.public_key().to_bytes()
        };

        Ok(HDPubKey {
            version: 1,
            pubkey,
            n_child: n_index,
            chain_id,
            keypath: keypath_string,
            internal,
        })
    }
}
