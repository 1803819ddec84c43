use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenClaims;
use crate::token::TokenCodec;
use crate::token::TokenConfig;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Services hold one of these behind an `Arc` and share it across requests;
/// it carries no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `MissingSecret` / `InvalidLifetime` - the token configuration is unusable
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(config)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash. Malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Performs the same password computation as [`Self::verify_password`] so
    /// the response time does not reveal whether the username is registered.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify_absent(password);
        AuthenticationError::InvalidCredentials
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - password does not match the stored hash
    /// * `TokenError` - token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<String, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject)?)
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue(subject)
    }

    /// Verify a token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.token_codec.verify(token)
    }

    /// Subject of verified claims; must be present and non-empty.
    pub fn extract_subject<'a>(&self, claims: &'a TokenClaims) -> Result<&'a str, TokenError> {
        self.token_codec.extract_subject(claims)
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
