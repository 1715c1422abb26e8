//! Content-derived identity digests.
//!
//! Two values with equal identity are substitutable for caching purposes.
//! Identity is computed from a value's serialized semantic attributes —
//! cached derived state must be excluded by the type (via `#[serde(skip)]`)
//! so that identity never depends on what happens to be memoized.

use std::fmt;

use serde::Serialize;
use sha2::{Digest as _, Sha256};

use tinct_core::{Error, Result};

/// A stable 256-bit content digest used as a cache key.
///
/// Digests display as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// The raw digest bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Builds a digest directly from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

/// Computes the identity digest of a value.
///
/// The value's semantic attributes are serialized to canonical JSON and
/// hashed with SHA-256. Collision resistance matters more than speed here —
/// the digest is a cache key, not a security boundary.
///
/// Serialization failure surfaces as [`Error::Identity`]: it signals that a
/// non-serializable object entered a cached code path, which is a
/// programming error and is never swallowed.
///
/// Multi-part keys are tuples:
///
/// ```rust
/// use tinct_cache::identity_of;
///
/// let a = identity_of(&("map_to_gamut", "clip", [255.0, 128.0, 0.0])).unwrap();
/// let b = identity_of(&("map_to_gamut", "scale", [255.0, 128.0, 0.0])).unwrap();
/// assert_ne!(a, b);
/// ```
pub fn identity_of<T: Serialize + ?Sized>(value: &T) -> Result<Digest> {
    let bytes = serde_json::to_vec(value).map_err(|e| Error::identity(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(Digest(hasher.finalize().into()))
}

/// Approximate serialized size of a value in bytes.
///
/// Used by the LRU store to account entries against its byte budget.
pub fn serialized_size<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    serde_json::to_vec(value)
        .map(|bytes| bytes.len())
        .map_err(|e| Error::identity(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_stable() {
        let a = identity_of(&("bradford", [0.9504, 1.0, 1.0888])).unwrap();
        let b = identity_of(&("bradford", [0.9504, 1.0, 1.0888])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_differs_by_content() {
        let a = identity_of(&("bradford", 1.0)).unwrap();
        let b = identity_of(&("bradford", 2.0)).unwrap();
        let c = identity_of(&("cat02", 1.0)).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hex_display() {
        let d = identity_of(&1.0_f64).unwrap();
        let hex = d.to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_serialized_size() {
        let size = serialized_size(&[1.0_f64, 2.0, 3.0]).unwrap();
        assert!(size > 0);
    }
}
