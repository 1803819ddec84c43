use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// `sub` stays optional on the wire so a decoded token without a subject can
/// be rejected by [`super::TokenCodec::extract_subject`] instead of failing
/// deserialization with a different error path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (the username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,

    /// Issued at (Unix timestamp, UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Create claims for a subject, valid for `lifetime` starting at `now`.
    ///
    /// Returns `None` when `now + lifetime` is outside the representable range.
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(lifetime)?;

        Some(Self {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
            iat: Some(now.timestamp()),
        })
    }

    /// Subject claim, if present.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
