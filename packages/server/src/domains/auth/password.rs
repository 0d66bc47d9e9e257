//! One-way hashing for passwords and OTP codes (bcrypt).

use anyhow::Result;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext secret for storage.
pub fn generate_hash(plain: &str) -> Result<String> {
    hash(plain, DEFAULT_COST).map_err(Into::into)
}

/// Compare a plaintext secret against a stored hash.
///
/// Malformed stored hashes count as a mismatch, not an error.
pub fn compare_hash(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the tests fast; production uses DEFAULT_COST.
    fn quick_hash(plain: &str) -> String {
        bcrypt::hash(plain, 4).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let hashed = quick_hash("s3cret-pass");
        assert!(compare_hash("s3cret-pass", &hashed));
    }

    #[test]
    fn test_mismatch() {
        let hashed = quick_hash("s3cret-pass");
        assert!(!compare_hash("wrong-pass", &hashed));
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert!(!compare_hash("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(quick_hash("same"), quick_hash("same"));
    }
}
