use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for password policy violations at signup
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },
}

/// Error for signup and login operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Business-rule outcomes
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Covers both an unknown username and a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Internal failures
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("User store error: {0}")]
    Store(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername(username) => AuthError::DuplicateUsername(username),
            other => AuthError::Store(other.to_string()),
        }
    }
}

impl From<auth::TokenError> for AuthError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::MissingSecret | auth::TokenError::InvalidLifetime(_) => {
                AuthError::Configuration(err.to_string())
            }
            auth::TokenError::EncodingFailed(_) | auth::TokenError::InvalidToken => {
                AuthError::Token(err.to_string())
            }
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}
