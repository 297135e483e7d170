//! Password hashing using argon2
//!
//! Provides salted password hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. The `*_async` variants move the
//! work onto the blocking thread pool so request tasks keep making progress.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Failure inside the hashing machinery (never a wrong password)
#[derive(Error, Debug)]
#[error("password hashing failed: {0}")]
pub struct HashingError(String);

/// Hash verified when the account does not exist, so unknown emails cost
/// as much as wrong passwords.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("not-a-real-password").ok());

/// Password hashing service
///
/// Uses Argon2id with a fresh random salt per hash. The salt is embedded in
/// the PHC output string, so two hashes of one password differ.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashingError(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String, HashingError> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| HashingError(format!("task join error: {}", e)))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// The digest comparison is constant-time. A mismatch is `Ok(false)`;
    /// only a malformed stored hash or an internal failure is an error.
    pub fn verify(password: &str, hash: &str) -> Result<bool, HashingError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| HashingError(format!("invalid hash format: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashingError(e.to_string())),
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool, HashingError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| HashingError(format!("task join error: {}", e)))?
    }

    /// Burn one verification against a throwaway hash
    pub async fn verify_dummy_async(password: String) {
        let _ = tokio::task::spawn_blocking(move || {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = Self::verify(&password, hash);
            }
        })
        .await;
    }
}
