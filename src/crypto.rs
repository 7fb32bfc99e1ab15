//! Cryptographic utilities for gateway signatures
//!
//! The gateway authenticates both directions with the same construction: the
//! values of a field set, ordered by field name, joined with `:`, followed by
//! `:` and the shop secret, hashed with SHA-256 and hex encoded.

/// Separator placed between canonical values and before the secret
pub const SEPARATOR: char = ':';

/// Length of a hex encoded signature
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Canonical encoding of field sets
pub mod canonical {
    use super::SEPARATOR;
    use sha2::{Digest, Sha256};
    use std::collections::HashMap;

    /// Field names in ascending byte order
    pub fn sort_keys<V>(fields: &HashMap<String, V>) -> Vec<&str> {
        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Build the string that gets hashed: sorted values, then the secret.
    ///
    /// Field names are dropped after sorting, so the result only authenticates
    /// the values and which fields were present.
    pub fn canonical_string(fields: &HashMap<String, String>, secret: &str) -> String {
        let capacity = fields.values().map(|v| v.len() + 1).sum::<usize>() + secret.len() + 1;
        let mut out = String::with_capacity(capacity);

        for (i, key) in sort_keys(fields).into_iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(&fields[key]);
        }
        out.push(SEPARATOR);
        out.push_str(secret);
        out
    }

    /// Lowercase hex SHA-256 of the canonical string
    pub fn digest(fields: &HashMap<String, String>, secret: &str) -> String {
        sha256_hex(canonical_string(fields, secret).as_bytes())
    }

    /// SHA-256 hash function, hex encoded
    pub fn sha256_hex(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }
}

/// Signature utilities
pub mod signature {
    use subtle::ConstantTimeEq;

    /// Compare a computed signature with a supplied one in constant time.
    ///
    /// Hex case is significant: the gateway only ever sends lowercase.
    pub fn signatures_match(computed: &str, supplied: &str) -> bool {
        computed.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}
