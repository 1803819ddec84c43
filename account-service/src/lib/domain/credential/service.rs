use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::SignupCommand;
use crate::domain::credential::ports::AuthServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Credential service: signup and login against a user store.
///
/// Each call is a single linear flow with no intermediate durable state.
/// Signup checks for an existing username first, but the store's uniqueness
/// constraint has the final word when two signups race.
pub struct CredentialService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> CredentialService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Unknown accounts still pay for one password computation.
    fn reject_unknown(&self, password: &Password) -> AuthError {
        match self.authenticator.reject_unknown_account(password.expose()) {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::TokenError(err) => AuthError::from(err),
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for CredentialService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Signup rejected: username taken");
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self.authenticator.hash_password(command.password.expose())?;

        let draft = NewUser {
            id: UserId::new(),
            username: command.username,
            fullname: command.fullname,
            password_hash,
        };

        let user = self.repository.create(draft).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        // A username that fails validation cannot belong to any account.
        let Ok(username) = Username::new(command.username) else {
            tracing::warn!("Login rejected: malformed username");
            return Err(self.reject_unknown(&command.password));
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Login rejected");
            return Err(self.reject_unknown(&command.password));
        };

        let token = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &user.password_hash,
                user.username.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username = %username, "Login rejected");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => AuthError::from(err),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(token)
    }
}
