use std::fmt;

use secrecy::ExposeSecret;
use secrecy::SecretString;

use crate::domain::credential::errors::PasswordPolicyError;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Username;

/// Plaintext password supplied for a single signup or login call.
///
/// Wrapped in a secret so it cannot end up in logs through `Debug`.
pub struct Password(SecretString);

impl Password {
    const MIN_LENGTH: usize = 5;

    /// Accept a password for signup, enforcing the length policy.
    ///
    /// # Errors
    /// * `TooShort` - fewer than 5 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(SecretString::new(password)))
    }

    /// Accept a password presented at login without applying the policy.
    pub fn presented(password: String) -> Self {
        Self(SecretString::new(password))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Command to register a new account.
#[derive(Debug)]
pub struct SignupCommand {
    pub username: Username,
    pub fullname: FullName,
    pub password: Password,
}

impl SignupCommand {
    pub fn new(username: Username, fullname: FullName, password: Password) -> Self {
        Self {
            username,
            fullname,
            password,
        }
    }
}

/// Command to exchange credentials for an access token.
///
/// The username stays a raw string: a malformed username is simply an
/// account that does not exist, and must fail like any other bad login.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: String,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(username: String, password: Password) -> Self {
        Self { username, password }
    }
}

/// Identity resolved from a verified access token.
///
/// Lives in the request extensions for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub username: String,
}

impl AuthenticatedIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
