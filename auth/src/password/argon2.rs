use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Fixed salt for the work done when there is no stored hash to check.
const ABSENT_HASH_SALT: &str = "dW5rbm93bi1hY2NvdW50LXNhbHQ";

/// Salted one-way password hashing (Argon2id).
///
/// Stateless: every call draws a fresh salt, so hashing the same plaintext
/// twice yields two different PHC strings that both verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest in one value)
    ///
    /// # Errors
    /// * `HashingFailed` - salt generation or the Argon2 computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC string.
    ///
    /// The digest comparison is constant time. A hash that cannot be parsed
    /// is reported as a mismatch so callers cannot tell the two apart.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::debug!("Stored password hash is not a valid PHC string");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one Argon2 computation on `password` and report a mismatch.
    ///
    /// Callers use this when the account does not exist, so rejecting an
    /// unknown account costs the same as rejecting a wrong password.
    pub fn verify_absent(&self, password: &str) -> bool {
        if let Ok(salt) = SaltString::from_b64(ABSENT_HASH_SALT) {
            let _ = Argon2::default().hash_password(password.as_bytes(), &salt);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "secret123";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrongpass", &hash));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret123").expect("Failed to hash password");
        let second = hasher.hash("secret123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret123", &first));
        assert!(hasher.verify("secret123", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_mismatch() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$broken"));
    }

    #[test]
    fn test_verify_absent_never_matches() {
        let hasher = PasswordHasher::new();

        assert!(SaltString::from_b64(ABSENT_HASH_SALT).is_ok());
        assert!(!hasher.verify_absent("secret123"));
        assert!(!hasher.verify_absent(""));
    }

    #[test]
    fn test_verify_empty_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("").expect("Failed to hash password");

        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify(" ", &hash));
    }
}
