//! Extended private key implementation for BIP32 hierarchical deterministic wallets.
//!
//! This module provides the core `ExtendedPrivateKey` type which combines a
//! private key with the metadata necessary for hierarchical key derivation.

use crate::{ChainCode, ChildNumber, Error, ExtendedPublicKey, PrivateKey, PublicKey, Result};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// Raw (non-base58, version-less) on-wire size of an extended key: depth (1)
/// + parent fingerprint (4) + child number (4) + chain code (32) + key (33).
pub const BIP32_EXTKEY_SIZE: usize = 74;

/// An extended private key for BIP32 hierarchical deterministic wallets.
///
/// # Structure
///
/// - **Private Key**: the 32-byte secp256k1 private key for signing
/// - **Chain Code**: 32 bytes of entropy used in child key derivation
/// - **Depth**: position in the derivation tree (0 for master)
/// - **Parent Fingerprint**: first 4 bytes of the parent's public key hash
/// - **Child Number**: the raw BIP32 index used to derive this key
///
/// This type intentionally has no notion of network (mainnet/testnet) or
/// base58 string encoding — both belong to the address/wallet-file layer,
/// which is out of scope for this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
    chain_code: ChainCode,
    private_key: PrivateKey,
}

impl ExtendedPrivateKey {
    /// The maximum allowed depth in the derivation tree (one-byte field).
    pub const MAX_DEPTH: u8 = 255;

    const MASTER_HMAC_KEY: &'static [u8] = b"Bitcoin seed";

    /// Generates a master extended private key from a seed.
    ///
    /// Implements BIP32 master key generation:
    /// `I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)`, split into
    /// `IL` (private key) and `IR` (chain code).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSeedLength`] if `seed` is not 16-64 bytes.
    /// [`Error::InvalidPrivateKey`] if `IL` is zero or >= curve order
    /// (astronomically unlikely).
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Error::InvalidSeedLength { length: seed.len() });
        }

        let mut hmac =
            HmacSha512::new_from_slice(Self::MASTER_HMAC_KEY).expect("HMAC can take key of any size");
        hmac.update(seed);
        let result = hmac.finalize().into_bytes();
        let (il, ir) = result.split_at(32);

        let private_key = PrivateKey::from_bytes(il)?;
        let chain_code = ChainCode::from_bytes(ir)?;

        Ok(ExtendedPrivateKey {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
            chain_code,
            private_key,
        })
    }

    /// Decodes a raw 74-byte extended private key (see [`BIP32_EXTKEY_SIZE`]).
    ///
    /// Layout: `depth(1) || parent_fingerprint(4) || child_number(4, BE) ||
    /// chain_code(32) || 0x00 || private_key(32)`.
    pub fn from_extkey_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BIP32_EXTKEY_SIZE {
            return Err(Error::ExtKeyDecodingInvalid {
                reason: format!(
                    "expected {} bytes, got {}",
                    BIP32_EXTKEY_SIZE,
                    bytes.len()
                ),
            });
        }
        let depth = bytes[0];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&bytes[1..5]);
        let child_number = u32::from_be_bytes(bytes[5..9].try_into().unwrap());
        let chain_code = ChainCode::from_bytes(&bytes[9..41])?;
        if bytes[41] != 0x00 {
            return Err(Error::ExtKeyDecodingInvalid {
                reason: "private key prefix byte must be 0x00".to_string(),
            });
        }
        let private_key = PrivateKey::from_bytes(&bytes[42..74])?;

        Ok(ExtendedPrivateKey {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            private_key,
        })
    }

    /// Encodes this key into the raw 74-byte extended-key format.
    pub fn to_extkey_bytes(&self) -> [u8; BIP32_EXTKEY_SIZE] {
        let mut out = [0u8; BIP32_EXTKEY_SIZE];
        out[0] = self.depth;
        out[1..5].copy_from_slice(&self.parent_fingerprint);
        out[5..9].copy_from_slice(&self.child_number.to_be_bytes());
        out[9..41].copy_from_slice(self.chain_code.as_bytes());
        out[41] = 0x00;
        out[42..74].copy_from_slice(&self.private_key.to_bytes());
        out
    }

    /// Returns the depth of this key in the derivation tree.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Returns the parent fingerprint.
    pub fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Returns the raw BIP32 child number (hardened bit included).
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Returns a reference to the chain code.
    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    /// Returns a reference to the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Converts this extended private key to its extended public key
    /// counterpart ("neutering"), preserving depth/fingerprint/child/chain
    /// code metadata.
    pub fn to_extended_public_key(&self) -> ExtendedPublicKey {
        let public_key = PublicKey::from_private_key(&self.private_key);
        ExtendedPublicKey::new(
            self.depth,
            self.parent_fingerprint,
            self.child_number,
            self.chain_code.clone(),
            public_key,
        )
    }

    /// Computes this key's fingerprint: the first 4 bytes of
    /// `RIPEMD160(SHA256(public_key))`.
    ///
    /// This is derived from the *public* key, so an extended private key and
    /// its neutered extended public key always share the same fingerprint.
    pub fn fingerprint(&self) -> [u8; 4] {
        let public_key = PublicKey::from_private_key(&self.private_key);
        let sha256_hash = Sha256::digest(public_key.to_bytes());
        let ripemd160_hash = Ripemd160::digest(sha256_hash);
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&ripemd160_hash[0..4]);
        fingerprint
    }

    /// Private child key derivation (CKD-priv), per BIP32.
    ///
    /// For a hardened child the HMAC input is `0x00 || parent_private_key ||
    /// index`; for a normal child it is `parent_public_key || index`. The
    /// resulting `IL` is tweak-added to the parent private key and `IR`
    /// becomes the child's chain code.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self> {
        let index = child.to_index();
        let new_depth = self
            .depth
            .checked_add(1)
            .ok_or(Error::DepthExceeded)?;

        let mut hmac = HmacSha512::new_from_slice(self.chain_code.as_bytes())
            .expect("HMAC can take key of any size");
        if child.is_hardened() {
            hmac.update(&[0x00]);
            hmac.update(&self.private_key.to_bytes());
        } else {
            let parent_pub = PublicKey::from_private_key(&self.private_key);
            hmac.update(&parent_pub.to_bytes());
        }
        hmac.update(&index.to_be_bytes());
        let result = hmac.finalize().into_bytes();
        let (il, ir) = result.split_at(32);

        let child_private_key = self.private_key.tweak_add(il).map_err(|_| Error::DerivationFailed {
            reason: "IL out of range or resulting key invalid".to_string(),
        })?;
        let child_chain_code = ChainCode::from_bytes(ir)?;

        Ok(ExtendedPrivateKey {
            depth: new_depth,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
            chain_code: child_chain_code,
            private_key: child_private_key,
        })
    }
}

impl std::fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("chain_code", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
