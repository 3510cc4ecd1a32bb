//! Credential hashing and verification (Argon2id).
//!
//! One-way, salted: hashing the same password twice yields two different
//! stored strings, both of which verify. Wrong passwords are `Ok(false)`,
//! never an error — only a malformed stored hash is an error, because that
//! indicates corrupt data or misconfiguration, not a bad login attempt.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use thiserror::Error;

/// Failure while hashing or verifying a credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The stored hash string is not a valid PHC-format hash.
    #[error("stored password hash is malformed")]
    MalformedHash,

    /// The hashing primitive itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `Ok(true)` iff `password` produced `stored`.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored).map_err(|_| CredentialError::MalformedHash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("s3cret-password").unwrap();
        assert!(verify_password("s3cret-password", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-input", &a).unwrap());
        assert!(verify_password("same-input", &b).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert_eq!(result.unwrap_err(), CredentialError::MalformedHash);
    }
}
