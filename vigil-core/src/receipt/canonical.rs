//! Canonical serialization and SHA-256 hashing for receipts.
//!
//! A receipt hash is computed over the canonical JSON form of every
//! content field except the hash itself. Canonical form means sorted
//! object keys at every level, so the hash is reproducible across
//! implementations.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::ReceiptError;

/// Prefix carried by every persisted receipt hash.
pub const HASH_PREFIX: &str = "sha256:";

/// Hex-encoded SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Canonical JSON of a serializable value with the top-level `hash`
/// field removed. `serde_json::Value` objects sort their keys, which is
/// what makes the form canonical.
pub fn canonical_without_hash<T: Serialize>(value: &T) -> Result<String, ReceiptError> {
    let mut json =
        serde_json::to_value(value).map_err(|e| ReceiptError::Canonicalize(e.to_string()))?;
    if let Some(obj) = json.as_object_mut() {
        obj.remove("hash");
    }
    Ok(json.to_string())
}

/// Compute the prefixed content hash of a receipt-shaped value.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String, ReceiptError> {
    let canonical = canonical_without_hash(value)?;
    Ok(format!("{HASH_PREFIX}{}", sha256_hex(canonical.as_bytes())))
}

/// Verify a receipt-shaped JSON value against its embedded hash.
///
/// Never errors: any missing, corrupted, or non-object input verifies
/// as `false`, leaving policy to the caller.
pub fn verify_value(value: &serde_json::Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let Some(expected) = obj.get("hash").and_then(|h| h.as_str()) else {
        return false;
    };

    let mut stripped = value.clone();
    if let Some(o) = stripped.as_object_mut() {
        o.remove("hash");
    }
    let recomputed = format!("{HASH_PREFIX}{}", sha256_hex(stripped.to_string().as_bytes()));
    recomputed == expected
}
