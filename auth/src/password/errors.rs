use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a mismatch and an unreadable hash
/// both come back as `false` from [`super::PasswordHasher::verify`].
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
