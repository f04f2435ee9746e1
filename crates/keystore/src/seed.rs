//! Master seed representation.

use hd_bip32::BIP32_EXTKEY_SIZE;
use zeroize::Zeroizing;

/// Either raw entropy to be expanded via BIP32 master-key derivation, or a
/// pre-encoded 74-byte extended private key — the two are distinguished
/// solely by length, per the store's external contract.
///
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSeed(Zeroizing<Vec<u8>>);

impl MasterSeed {
    /// Wraps raw seed bytes, taking ownership so they can be zeroized.
    pub fn new(bytes: Vec<u8>) -> Self {
        MasterSeed(Zeroizing::new(bytes))
    }

    /// True if this seed's length matches [`BIP32_EXTKEY_SIZE`], meaning it
    /// must be interpreted as a pre-encoded extended private key rather than
    /// raw entropy for master-key derivation.
    pub fn is_encoded_extkey(&self) -> bool {
        self.0.len() == BIP32_EXTKEY_SIZE
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for MasterSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MasterSeed([REDACTED; {} bytes])", self.0.len())
    }
}
