//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque random token of `len` hex characters
///
/// Odd lengths are rounded down to the nearest even length, matching the
/// underlying byte granularity.
pub fn random_token(len: usize) -> String {
    hex::encode(random_bytes(len / 2))
}
