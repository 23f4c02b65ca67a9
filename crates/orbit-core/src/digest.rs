//! # Content Digests
//!
//! SHA-256 fingerprints of serializable reference data. Catalogs are
//! versioned by a human label *and* a digest of their content, so an
//! assessment can record exactly which rule set it was scored against.
//!
//! Digests are taken over `serde_json` output. Struct fields serialize in
//! declaration order and catalogs are slices, so the bytes are stable for a
//! given build.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::OrbitError;

/// Hex-encoded SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Digest raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        let mut hex = String::with_capacity(64);
        for byte in hash {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    /// The 64-character hex string.
    pub fn to_hex(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

/// Digest the JSON serialization of `value`.
pub fn content_digest<T: Serialize + ?Sized>(value: &T) -> Result<ContentDigest, OrbitError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(ContentDigest::of_bytes(&bytes))
}
