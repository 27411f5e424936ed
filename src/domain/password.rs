//! Password hashing.
//!
//! Argon2id with a fresh random salt per hash, stored in PHC string
//! format so the parameters and salt travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Hash a plain text password for storage.
///
/// # Errors
/// Returns an internal error if Argon2 rejects the input.
pub fn hash(plain_text: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(plain_text.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plain text password against a stored hash.
///
/// A hash string that cannot be parsed never verifies.
pub fn verify(plain_text: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[inline]
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash("lopez2001").unwrap();

        assert!(verify("lopez2001", &stored));
        assert!(!verify("incorrectpassword", &stored));
    }

    #[test]
    fn test_hash_is_not_plain_text() {
        let stored = hash("lopez2001").unwrap();
        assert_ne!(stored, "lopez2001");
        assert!(stored.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = hash("SamePassword123").unwrap();
        let second = hash("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(first, second);
        assert!(verify("SamePassword123", &first));
        assert!(verify("SamePassword123", &second));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!verify("password", "not-a-phc-string"));
        assert!(!verify("password", ""));
    }
}
