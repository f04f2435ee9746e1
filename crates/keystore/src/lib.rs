//! HD key store core: an in-memory custodian for BIP32-style key trees.
//!
//! This crate owns master seeds for one or more HD chains, a catalog of
//! derived public keys addressable by hash, the derivation engine that
//! reconstructs extended private keys from a seed and a keypath, and the
//! one-way plaintext-to-encrypted transition that keeps seeds confidential
//! at rest in memory. Disk persistence, wallet file formats, the symmetric
//! cipher, and the non-HD legacy key store are all external collaborators
//! this crate composes with rather than implements — see
//! [`collaborators::BaseKeyStore`] and [`collaborators::SeedEncryptor`].
//!
//! BIP32 arithmetic itself lives in the sibling [`hd_bip32`] crate; this
//! crate is the wallet-facing layer built on top of it.

mod catalog;
mod chain;
mod collaborators;
mod engine;
mod error;
mod keypath;
mod seed;
mod store;
mod vault;
mod wire;

pub use catalog::{HDPubKey, KeyId, PubKeyCatalog};
pub use chain::{ChainId, ChainRegistry, HDChain};
pub use collaborators::{BaseKeyStore, CipherBlob, SeedEncryptor};
pub use error::{Result, StoreError};
pub use keypath::{materialize, parse, with_final_index, Segment, MAX_KEYPATH_SEGMENTS};
pub use seed::MasterSeed;
pub use store::HDKeyStore;
pub use vault::SeedVault;
pub use wire::{decode_hd_chain, decode_hd_pub_key, encode_hd_chain, encode_hd_pub_key};
