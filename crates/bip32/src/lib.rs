//! # hd-bip32 - Hierarchical Deterministic Key Primitives
//!
//! A Rust implementation of BIP32 hierarchical deterministic (HD) key
//! derivation over secp256k1.
//!
//! ## Overview
//!
//! BIP32 (Bitcoin Improvement Proposal 32) defines the standard for creating
//! hierarchical deterministic wallets: a tree of key pairs derived from a
//! single seed, enabling backup and recovery of unlimited keys from that
//! seed alone.
//!
//! This crate is deliberately wallet-agnostic: it has no notion of network
//! (mainnet/testnet), no base58/xprv/xpub string encoding, and no mnemonic
//! handling. Those concerns belong to the address and wallet-file layers
//! built on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use hd_bip32::{ChildNumber, ExtendedPrivateKey};
//!
//! let seed = [0x01u8; 64];
//! let master = ExtendedPrivateKey::from_seed(&seed)?;
//!
//! let account = master
//!     .derive_child(ChildNumber::Hardened(44))?
//!     .derive_child(ChildNumber::Hardened(0))?
//!     .derive_child(ChildNumber::Hardened(0))?;
//!
//! assert_eq!(account.depth(), 3);
//! # Ok::<(), hd_bip32::Error>(())
//! ```

mod chain_code;
mod child_number;
mod error;
mod extended_private_key;
mod extended_public_key;
mod private_key;
mod public_key;

/// Utility functions and convenience methods for common BIP32 operations.
pub mod utils;

pub use chain_code::ChainCode;
pub use child_number::{ChildNumber, HARDENED_BIT};
pub use error::{Error, Result};
pub use extended_private_key::{ExtendedPrivateKey, BIP32_EXTKEY_SIZE};
pub use extended_public_key::ExtendedPublicKey;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
