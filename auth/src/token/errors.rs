use thiserror::Error;

/// Error type for token operations.
///
/// Every verification failure is reported as `InvalidToken`; the concrete
/// reason is only logged at debug level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Token lifetime out of range: {0} seconds")]
    InvalidLifetime(i64),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
