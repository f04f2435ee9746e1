//! KeyPath parsing and materialization.
//!
//! Keypaths are `/`-separated. The leading segment is the literal `m`
//! denoting the master. Each subsequent segment is either a decimal integer
//! (optionally followed by `'` to mark hardened derivation) or the single
//! literal `c`, a placeholder for the internal/external chain switch that
//! must be materialized away before derivation.

use crate::error::{Result, StoreError};

/// The maximum number of derivation segments a keypath may contain, bounding
/// per-call derivation cost.
pub const MAX_KEYPATH_SEGMENTS: usize = 255;

/// A single parsed keypath segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The leading `m` marking the master key. Only valid at position 0.
    Master,
    /// The chain-switch placeholder `c`, materialized to `Child { index: 0
    /// | 1, hardened: false }` before derivation.
    ChainSwitch,
    /// A concrete derivation step.
    Child {
        /// The non-hardened index, in `[0, 2^31)`.
        index: u32,
        /// Whether this step uses hardened derivation.
        hardened: bool,
    },
}

/// Parses a keypath string into an ordered sequence of segments.
///
/// Does not materialize `c` placeholders — callers must call
/// [`materialize`] before passing the result to the derivation engine.
pub fn parse(path: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for (i, component) in path.split('/').enumerate() {
        if component.is_empty() {
            return Err(StoreError::InvalidKeyPath {
                reason: "empty path component".to_string(),
            });
        }
        if component == "m" {
            if i != 0 {
                return Err(StoreError::InvalidKeyPath {
                    reason: "'m' must only appear as the first segment".to_string(),
                });
            }
            segments.push(Segment::Master);
        } else if i == 0 {
            return Err(StoreError::InvalidKeyPath {
                reason: "path must start with 'm'".to_string(),
            });
        } else if component == "c" {
            segments.push(Segment::ChainSwitch);
        } else {
            let (digits, hardened) = match component.strip_suffix('\'') {
                Some(rest) => (rest, true),
                None => (component, false),
            };
            let index: i64 = digits.parse().map_err(|_| StoreError::InvalidKeyPath {
                reason: format!("segment '{}' is not a valid integer", component),
            })?;
            if !(0..0x8000_0000i64).contains(&index) {
                return Err(StoreError::InvalidKeyPath {
                    reason: format!("segment index {} out of range", index),
                });
            }
            segments.push(Segment::Child {
                index: index as u32,
                hardened,
            });
        }
        if segments.len() > MAX_KEYPATH_SEGMENTS {
            return Err(StoreError::InvalidKeyPath {
                reason: format!("path exceeds {} segments", MAX_KEYPATH_SEGMENTS),
            });
        }
    }
    Ok(segments)
}

/// Replaces the chain-switch segment with a concrete, non-hardened child
/// index: `0` for external (receive), `1` for internal (change).
///
/// Operates segment-wise rather than via raw string substitution: only a
/// path component that is exactly `c` is replaced. This is observably
/// identical to whole-string substitution for every template this store
/// accepts, since `c` only ever appears as a standalone component.
pub fn materialize(segments: &[Segment], internal: bool) -> Vec<Segment> {
    let replacement = Segment::Child {
        index: if internal { 1 } else { 0 },
        hardened: false,
    };
    segments
        .iter()
        .map(|s| match s {
            Segment::ChainSwitch => replacement,
            other => *other,
        })
        .collect()
}

/// Appends a final derivation segment (the address-level index) to an
/// already-materialized path.
pub fn with_final_index(segments: &[Segment], index: u32, hardened: bool) -> Vec<Segment> {
    let mut out = segments.to_vec();
    out.push(Segment::Child { index, hardened });
    out
}

/// Reconstructs the canonical string form of a fully materialized path
/// (no [`Segment::ChainSwitch`] left).
pub fn format(segments: &[Segment]) -> Result<String> {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        match segment {
            Segment::Master => out.push('m'),
            Segment::ChainSwitch => {
                return Err(StoreError::InvalidKeyPath {
                    reason: "chain switch segment not materialized".to_string(),
                })
            }
            Segment::Child { index, hardened } => {
                out.push_str(&index.to_string());
                if *hardened {
                    out.push('\'');
                }
            }
        }
    }
    Ok(out)
}
