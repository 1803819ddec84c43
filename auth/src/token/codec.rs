use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Settings a [`TokenCodec`] is built from.
///
/// Passed in explicitly by the caller; the codec never reads the process
/// environment itself.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub lifetime: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Issues and verifies signed, time-bound access tokens.
///
/// Tokens are JWTs signed with HS256. Verification accepts HS256 only, so a
/// token re-signed under another algorithm is rejected even when it is
/// otherwise well formed.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenCodec {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Build a codec from explicit configuration.
    ///
    /// # Errors
    /// * `MissingSecret` - the secret is empty or only whitespace
    /// * `InvalidLifetime` - the lifetime is not positive, or expiries computed
    ///   from the current time would fall outside the representable range
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        if config.secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        if config.lifetime <= Duration::zero()
            || Utc::now().checked_add_signed(config.lifetime).is_none()
        {
            return Err(TokenError::InvalidLifetime(config.lifetime.num_seconds()));
        }

        let secret = config.secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            lifetime: config.lifetime,
        })
    }

    /// Issue a token for `subject`, expiring one lifetime from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `now + lifetime` is outside the representable range
    /// * `EncodingFailed` - serialization or signing failed
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::for_subject(subject, now, self.lifetime)
            .ok_or(TokenError::InvalidLifetime(self.lifetime.num_seconds()))?;

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the configured secret and the current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Checks, in order: structure, algorithm, signature, presence of `exp`,
    /// and `now < exp`. Every failure is reported as `InvalidToken`; the
    /// concrete reason only reaches the debug log.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_required_spec_claims(&["exp"]);
        // Expiry is checked below against the caller's clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected during decoding");
                TokenError::InvalidToken
            })?
            .claims;

        if claims.is_expired(now.timestamp()) {
            tracing::debug!(exp = claims.exp, now = now.timestamp(), "Token rejected as expired");
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }

    /// Subject of verified claims; must be present and non-empty.
    pub fn extract_subject<'a>(&self, claims: &'a TokenClaims) -> Result<&'a str, TokenError> {
        match claims.subject() {
            Some(subject) if !subject.is_empty() => Ok(subject),
            _ => {
                tracing::debug!("Token rejected: missing or empty subject");
                Err(TokenError::InvalidToken)
            }
        }
    }
}
