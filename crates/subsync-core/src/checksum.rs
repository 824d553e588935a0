//! Body digests for change detection.

use sha2::{Digest, Sha256};

/// SHA-256 of `text` (UTF-8 bytes) as lowercase hex.
pub fn body_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
