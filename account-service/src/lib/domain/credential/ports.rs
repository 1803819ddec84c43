use async_trait::async_trait;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::SignupCommand;
use crate::domain::user::models::User;

/// Port for credential operations: account registration and login.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username and full name plus the plaintext password
    ///
    /// # Returns
    /// Stored user record (the caller must not expose its password hash)
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `Store` - User store operation failed
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Token` / `Configuration` - Token issuance failed
    /// * `Store` - User store operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;
}
