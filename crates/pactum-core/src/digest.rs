//! # Digest Helpers
//!
//! SHA-256 hashing used for dispute identifier derivation. Identifiers are
//! rendered as lowercase hex so they are stable across serialization
//! boundaries and safe to use as map keys and log fields.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write;
        // Infallible for String.
        let _ = write!(out, "{byte:02x}");
    }
    out
}
