//! Extended public key implementation for BIP32 hierarchical deterministic wallets.
//!
//! This module provides the ExtendedPublicKey type which combines a public key
//! with metadata necessary for hierarchical key derivation according to BIP-32.

use crate::extended_private_key::BIP32_EXTKEY_SIZE;
use crate::{ChainCode, ChildNumber, Error, PublicKey, Result};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use secp256k1::{Scalar, SECP256K1};
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// An extended public key for BIP32 hierarchical deterministic wallets.
///
/// Extended public keys combine a public key with additional metadata required for
/// hierarchical key derivation. Unlike extended private keys, extended public keys
/// can only derive non-hardened (normal) child keys.
///
/// # Structure
///
/// An extended public key contains:
/// - **Public Key**: The 33-byte compressed secp256k1 public key
/// - **Chain Code**: 32 bytes of entropy used in child key derivation
/// - **Depth**: The depth in the derivation tree (0 for master, 1 for level-1, etc.)
/// - **Parent Fingerprint**: First 4 bytes of parent public key hash (for identification)
/// - **Child Number**: The index of this key in its parent's children
///
/// # Limitations
///
/// Extended public keys can only derive **normal (non-hardened)** child keys.
/// Hardened derivation requires the private key and cannot be performed with
/// only the public key. This is a security feature of BIP-32.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    /// Depth in the derivation tree.
    /// - 0 = master key
    /// - 1 = first-level child
    /// - 2 = second-level child
    /// - etc.
    ///
    /// Maximum depth is 255 according to BIP-32.
    depth: u8,

    /// The first 4 bytes of the parent key's public key hash (HASH160).
    /// Used to quickly identify the parent key.
    /// Set to [0, 0, 0, 0] for the master key.
    parent_fingerprint: [u8; 4],

    /// The child index used to derive this key from its parent.
    /// - Values 0 to 2^31-1 (0x7FFFFFFF): normal derivation (allowed)
    /// - Values 2^31 to 2^32-1 (0x80000000+): hardened derivation (NOT allowed)
    ///
    /// Set to 0 for the master key.
    child_number: u32,

    /// The chain code used for deriving child keys.
    ///
    /// The chain code is the same for corresponding extended private and
    /// public key pairs.
    chain_code: ChainCode,

    /// The compressed secp256k1 public key (33 bytes).
    public_key: PublicKey,
}

impl ExtendedPublicKey {
    /// The maximum allowed depth in the derivation tree.
    pub const MAX_DEPTH: u8 = 255;

    /// Creates a new `ExtendedPublicKey`.
    pub fn new(
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
        chain_code: ChainCode,
        public_key: PublicKey,
    ) -> Self {
        ExtendedPublicKey {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            public_key,
        }
    }

    /// Decodes a raw 74-byte extended public key. Layout matches
    /// [`crate::ExtendedPrivateKey::from_extkey_bytes`] except the final
    /// 33 bytes are a compressed public key, not a 0x00-prefixed private key.
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
        let public_key = PublicKey::from_bytes(&bytes[41..74])?;

        Ok(ExtendedPublicKey {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            public_key,
        })
    }

    /// Encodes this key into the raw 74-byte extended-key format.
    pub fn to_extkey_bytes(&self) -> [u8; BIP32_EXTKEY_SIZE] {
        let mut out = [0u8; BIP32_EXTKEY_SIZE];
        out[0] = self.depth;
        out[1..5].copy_from_slice(&self.parent_fingerprint);
        out[5..9].copy_from_slice(&self.child_number.to_be_bytes());
        out[9..41].copy_from_slice(self.chain_code.as_bytes());
        out[41..74].copy_from_slice(&self.public_key.to_bytes());
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

    /// Returns the child number.
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Returns a reference to the chain code.
    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    /// Returns a reference to the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Computes this key's fingerprint: the first 4 bytes of
    /// `RIPEMD160(SHA256(public_key))`.
    pub fn fingerprint(&self) -> [u8; 4] {
        let sha256_hash = Sha256::digest(self.public_key.to_bytes());
        let ripemd160_hash = Ripemd160::digest(sha256_hash);
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&ripemd160_hash[0..4]);
        fingerprint
    }

    /// Public child key derivation (CKD-pub), per BIP32.
    ///
    /// Only normal (non-hardened) children can be derived this way; hardened
    /// derivation requires the private key and returns
    /// [`Error::HardenedDerivationUnavailable`].
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self> {
        if child.is_hardened() {
            return Err(Error::HardenedDerivationUnavailable);
        }
        let index = child.to_index();
        let new_depth = self.depth.checked_add(1).ok_or(Error::DepthExceeded)?;

        let mut hmac = HmacSha512::new_from_slice(self.chain_code.as_bytes())
            .expect("HMAC can take key of any size");
        hmac.update(&self.public_key.to_bytes());
        hmac.update(&index.to_be_bytes());
        let result = hmac.finalize().into_bytes();
        let (il, ir) = result.split_at(32);

        let tweak = Scalar::from_be_bytes(il.try_into().unwrap()).map_err(|_| {
            Error::DerivationFailed {
                reason: "IL is not a valid scalar".to_string(),
            }
        })?;
        let tweaked = self
            .public_key
            .inner()
            .add_exp_tweak(SECP256K1, &tweak)
            .map_err(|_| Error::DerivationFailed {
                reason: "public key tweak addition failed".to_string(),
            })?;
        let child_public_key = PublicKey::new(tweaked);
        let child_chain_code = ChainCode::from_bytes(ir)?;

        Ok(ExtendedPublicKey {
            depth: new_depth,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
            chain_code: child_chain_code,
            public_key: child_public_key,
        })
    }
}

impl std::fmt::Debug for ExtendedPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedPublicKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("chain_code", &hex::encode(self.chain_code.as_bytes()))
            .field("public_key", &self.public_key)
            .finish()
    }
}
