//! Derivation engine: walks a materialized keypath against a master seed.

use crate::error::{Result, StoreError};
use crate::keypath::Segment;
use hd_bip32::{ChildNumber, ExtendedPrivateKey};

/// Derives the extended private key at the end of `segments`, starting from
/// `seed`.
///
/// If `seed` is exactly [`hd_bip32::BIP32_EXTKEY_SIZE`] bytes, it is decoded
/// directly as an extended private key; otherwise BIP32 master-key-from-seed
/// is run on the raw bytes. `segments` must already be materialized: a
/// [`Segment::ChainSwitch`] found mid-walk is a programmer error and fails
/// with [`StoreError::InvalidKeyPath`], as does encountering [`Segment::Master`]
/// anywhere but position 0.
pub fn derive_private_key(
    seed_bytes: &[u8],
    is_encoded_extkey: bool,
    segments: &[Segment],
) -> Result<ExtendedPrivateKey> {
    let mut key = if is_encoded_extkey {
        ExtendedPrivateKey::from_extkey_bytes(seed_bytes)?
    } else {
        ExtendedPrivateKey::from_seed(seed_bytes)?
    };

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Master => {
                if i != 0 {
                    return Err(StoreError::InvalidKeyPath {
                        reason: "'m' encountered after position 0".to_string(),
                    });
                }
            }
            Segment::ChainSwitch => {
                return Err(StoreError::InvalidKeyPath {
                    reason: "chain switch segment not materialized before derivation".to_string(),
                })
            }
            Segment::Child { index, hardened } => {
                let child = if *hardened {
                    ChildNumber::Hardened(*index)
                } else {
                    ChildNumber::Normal(*index)
                };
                key = key.derive_child(child)?;
            }
        }
    }

    Ok(key)
}
