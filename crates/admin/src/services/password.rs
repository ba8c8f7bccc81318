//! Admin password hashing with Argon2id.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Minimum password length for new admins.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    #[error("failed to hash password")]
    Hash,
}

/// Hash a new admin password.
///
/// # Errors
///
/// Returns `PasswordError::TooShort` for short passwords, or
/// `PasswordError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Check a password against a stored PHC hash. A malformed hash never matches.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("nakshi-kantha-42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("nakshi-kantha-42", &hash));
        assert!(!verify_password("nakshi-kantha-43", &hash));
    }

    #[test]
    fn test_short_password_rejected() {
        assert_eq!(hash_password("short"), Err(PasswordError::TooShort));
    }

    #[test]
    fn test_plaintext_stored_value_never_matches() {
        assert!(!verify_password("admin123", "admin123"));
    }
}
