//! Utility functions and convenience methods for common BIP32 operations.
//!
//! This module provides ergonomic wrappers around common patterns to reduce
//! boilerplate in application code.

use crate::{ExtendedPrivateKey, ExtendedPublicKey, Result};

/// Generates a master keypair (both private and public) from a seed.
///
/// This is a convenience function that combines [`ExtendedPrivateKey::from_seed()`]
/// and [`ExtendedPrivateKey::to_extended_public_key()`] into a single call.
///
/// Both keys returned have:
/// - `depth` = 0 (master keys)
/// - `parent_fingerprint` = [0, 0, 0, 0]
/// - `child_number` = 0
/// - the same chain code
///
/// # Errors
///
/// Returns [`Error::InvalidSeedLength`](crate::Error::InvalidSeedLength) if
/// `seed` is not 16-64 bytes.
///
/// # Examples
///
/// ```rust
/// use hd_bip32::utils::generate_master_keypair;
///
/// let seed = [0x01; 64];
/// let (master_priv, master_pub) = generate_master_keypair(&seed)?;
///
/// assert_eq!(master_priv.depth(), 0);
/// assert_eq!(master_pub.depth(), 0);
/// assert_eq!(master_priv.fingerprint(), master_pub.fingerprint());
/// # Ok::<(), hd_bip32::Error>(())
/// ```
pub fn generate_master_keypair(seed: &[u8]) -> Result<(ExtendedPrivateKey, ExtendedPublicKey)> {
    let private_key = ExtendedPrivateKey::from_seed(seed)?;
    let public_key = private_key.to_extended_public_key();
    Ok((private_key, public_key))
}
