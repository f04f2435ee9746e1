//! Fixed wire layouts for [`crate::catalog::HDPubKey`] and
//! [`crate::chain::HDChain`], for an external persistence layer.
//!
//! This module only encodes and decodes byte buffers; it never touches
//! disk. Integers are little-endian; variable-length fields are prefixed by
//! a compact-size unsigned integer (1 byte for values < 0xFD, otherwise a
//! 0xFD marker followed by a little-endian `u16`, mirroring Bitcoin Core's
//! `CompactSize` encoding).

use crate::catalog::HDPubKey;
use crate::chain::{ChainId, HDChain};
use crate::error::{Result, StoreError};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use hd_bip32::ExtendedPublicKey;
use std::io::{Cursor, Read, Write};

fn write_compact_size<W: Write>(w: &mut W, len: usize) -> Result<()> {
    if len < 0xFD {
        w.write_u8(len as u8)
            .map_err(|e| io_err("compact size", e))?;
    } else if len <= u16::MAX as usize {
        w.write_u8(0xFD).map_err(|e| io_err("compact size marker", e))?;
        w.write_u16::<LE>(len as u16)
            .map_err(|e| io_err("compact size value", e))?;
    } else {
        return Err(StoreError::InvalidKeyPath {
            reason: format!("field length {} too large for this wire format", len),
        });
    }
    Ok(())
}

fn read_compact_size<R: Read>(r: &mut R) -> Result<usize> {
    let first = r.read_u8().map_err(|e| io_err("compact size", e))?;
    if first < 0xFD {
        Ok(first as usize)
    } else {
        let value = r
            .read_u16::<LE>()
            .map_err(|e| io_err("compact size value", e))?;
        Ok(value as usize)
    }
}

fn io_err(field: &str, e: std::io::Error) -> StoreError {
    StoreError::InvalidKeyPath {
        reason: format!("truncated wire buffer reading {}: {}", field, e),
    }
}

/// Encodes `record` per the HDPubKey v1 wire layout: `version:int32` ·
/// `pubkey:varlen-bytes` · `nChild:uint32` · `chainID:32bytes` ·
/// `keypath:varlen-string` · `internal:uint8`.
pub fn encode_hd_pub_key(record: &HDPubKey) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.write_i32::<LE>(record.version).map_err(|e| io_err("version", e))?;
    write_compact_size(&mut out, record.pubkey.len())?;
    out.write_all(&record.pubkey).map_err(|e| io_err("pubkey", e))?;
    out.write_u32::<LE>(record.n_child).map_err(|e| io_err("n_child", e))?;
    out.write_all(record.chain_id.as_bytes()).map_err(|e| io_err("chain_id", e))?;
    let keypath_bytes = record.keypath.as_bytes();
    write_compact_size(&mut out, keypath_bytes.len())?;
    out.write_all(keypath_bytes).map_err(|e| io_err("keypath", e))?;
    out.write_u8(record.internal as u8).map_err(|e| io_err("internal", e))?;
    Ok(out)
}

/// Decodes an HDPubKey v1 record previously produced by
/// [`encode_hd_pub_key`].
pub fn decode_hd_pub_key(bytes: &[u8]) -> Result<HDPubKey> {
    let mut cursor = Cursor::new(bytes);
    let version = cursor.read_i32::<LE>().map_err(|e| io_err("version", e))?;

    let pubkey_len = read_compact_size(&mut cursor)?;
    if pubkey_len != 33 {
        return Err(StoreError::SeedEncodingInvalid {
            reason: format!("pubkey field must be 33 bytes, got {}", pubkey_len),
        });
    }
    let mut pubkey = [0u8; 33];
    cursor.read_exact(&mut pubkey).map_err(|e| io_err("pubkey", e))?;

    let n_child = cursor.read_u32::<LE>().map_err(|e| io_err("n_child", e))?;

    let mut chain_id_bytes = [0u8; 32];
    cursor.read_exact(&mut chain_id_bytes).map_err(|e| io_err("chain_id", e))?;

    let keypath_len = read_compact_size(&mut cursor)?;
    let mut keypath_bytes = vec![0u8; keypath_len];
    cursor.read_exact(&mut keypath_bytes).map_err(|e| io_err("keypath", e))?;
    let keypath = String::from_utf8(keypath_bytes).map_err(|e| StoreError::SeedEncodingInvalid {
        reason: format!("keypath is not valid utf-8: {}", e),
    })?;

    let internal = cursor.read_u8().map_err(|e| io_err("internal", e))? != 0;

    Ok(HDPubKey {
        version,
        pubkey,
        n_child,
        chain_id: ChainId::new(chain_id_bytes),
        keypath,
        internal,
    })
}

/// Encodes `chain` per the HDChain v1 wire layout: `version:int32` ·
/// `nCreateTime:int64` · `chainID:32bytes` · `keypathTemplate:varlen-string`
/// · `usePubCKD:uint8` · if `usePubCKD`: `externalExtPubKey` ·
/// `internalExtPubKey` (BIP32-encoded 74 bytes each, the latter all-zero
/// when absent).
pub fn encode_hd_chain(chain: &HDChain) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.write_i32::<LE>(chain.version).map_err(|e| io_err("version", e))?;
    out.write_i64::<LE>(chain.create_time).map_err(|e| io_err("create_time", e))?;
    out.write_all(chain.chain_id.as_bytes()).map_err(|e| io_err("chain_id", e))?;

    let template_bytes = chain.keypath_template.as_bytes();
    write_compact_size(&mut out, template_bytes.len())?;
    out.write_all(template_bytes).map_err(|e| io_err("keypath_template", e))?;

    out.write_u8(chain.use_pub_ckd as u8).map_err(|e| io_err("use_pub_ckd", e))?;
    if chain.use_pub_ckd {
        let external = chain
            .external_ext_pub_key
            .as_ref()
            .expect("use_pub_ckd implies external_ext_pub_key is Some (HDChain::new invariant)");
        out.write_all(&external.to_extkey_bytes())
            .map_err(|e| io_err("external_ext_pub_key", e))?;
        match &chain.internal_ext_pub_key {
            Some(internal) => out
                .write_all(&internal.to_extkey_bytes())
                .map_err(|e| io_err("internal_ext_pub_key", e))?,
            None => out
                .write_all(&[0u8; hd_bip32::BIP32_EXTKEY_SIZE])
                .map_err(|e| io_err("internal_ext_pub_key", e))?,
        }
    }
    Ok(out)
}

/// Decodes an HDChain v1 record previously produced by [`encode_hd_chain`].
pub fn decode_hd_chain(bytes: &[u8]) -> Result<HDChain> {
    let mut cursor = Cursor::new(bytes);
    let version = cursor.read_i32::<LE>().map_err(|e| io_err("version", e))?;
    let create_time = cursor.read_i64::<LE>().map_err(|e| io_err("create_time", e))?;

    let mut chain_id_bytes = [0u8; 32];
    cursor.read_exact(&mut chain_id_bytes).map_err(|e| io_err("chain_id", e))?;

    let template_len = read_compact_size(&mut cursor)?;
    let mut template_bytes = vec![0u8; template_len];
    cursor.read_exact(&mut template_bytes).map_err(|e| io_err("keypath_template", e))?;
    let keypath_template = String::from_utf8(template_bytes).map_err(|e| {
        StoreError::SeedEncodingInvalid {
            reason: format!("keypath_template is not valid utf-8: {}", e),
        }
    })?;

    let use_pub_ckd = cursor.read_u8().map_err(|e| io_err("use_pub_ckd", e))? != 0;

    let (external_ext_pub_key, internal_ext_pub_key) = if use_pub_ckd {
        let mut external_bytes = [0u8; hd_bip32::BIP32_EXTKEY_SIZE];
        cursor
            .read_exact(&mut external_bytes)
            .map_err(|e| io_err("external_ext_pub_key", e))?;
        let external = ExtendedPublicKey::from_extkey_bytes(&external_bytes)?;

        let mut internal_bytes = [0u8; hd_bip32::BIP32_EXTKEY_SIZE];
        cursor
            .read_exact(&mut internal_bytes)
            .map_err(|e| io_err("internal_ext_pub_key", e))?;
        let internal = if internal_bytes == [0u8; hd_bip32::BIP32_EXTKEY_SIZE] {
            None
        } else {
            Some(ExtendedPublicKey::from_extkey_bytes(&internal_bytes)?)
        };
        (Some(external), internal)
    } else {
        (None, None)
    };

    HDChain::new(
        version,
        create_time,
        ChainId::new(chain_id_bytes),
        keypath_template,
        external_ext_pub_key,
        internal_ext_pub_key,
        use_pub_ckd,
    )
}
