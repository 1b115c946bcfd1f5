//! Credential hashing.
//!
//! Passwords are hashed with Argon2id into a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$digest`). The string carries the
//! parameters and salt, so verification needs nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Errors raised while producing a hash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("password cannot be empty")]
    EmptyInput,

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

/// One-way, salted password hashing.
///
/// `hash` is non-deterministic (a fresh salt per call); `verify` never errors.
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` into a self-describing string suitable for storage.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check `password` against a string produced by [`CredentialHasher::hash`].
    ///
    /// Returns false for empty inputs, malformed hashes and mismatches.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Hasher {
    /// Hasher with the library's recommended cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with an explicit cost: memory in KiB, iterations and lanes.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        if password.is_empty() {
            return Err(HashError::EmptyInput);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        if password.is_empty() || hash.is_empty() {
            return false;
        }

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        // Cost and salt come from the parsed hash, not from `self`.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::with_cost(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("secret1", &hash));
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = cheap_hasher();
        let first = hasher.hash("SamePassword123").unwrap();
        let second = hasher.hash("SamePassword123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("SamePassword123", &first));
        assert!(hasher.verify("SamePassword123", &second));
    }

    #[test]
    fn test_hash_rejects_empty_password() {
        assert_eq!(cheap_hasher().hash(""), Err(HashError::EmptyInput));
    }

    #[test]
    fn test_verify_empty_inputs_are_false() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(!hasher.verify("", &hash));
        assert!(!hasher.verify("secret1", ""));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!cheap_hasher().verify("anything", "not-a-valid-hash"));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let hash = cheap_hasher().hash("secret1").unwrap();

        // A hasher configured with a different cost still verifies it.
        assert!(Argon2Hasher::new().verify("secret1", &hash));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = Argon2Hasher::with_cost(0, 0, 0);
        assert!(matches!(result, Err(HashError::InvalidParams(_))));
    }

    #[test]
    fn test_default_hasher_round_trip() {
        let hasher = Argon2Hasher::default();
        let hash = hasher.hash("correct-horse").unwrap();
        assert!(hasher.verify("correct-horse", &hash));
    }
}
