pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use codec::TokenConfig;
pub use codec::DEFAULT_TOKEN_LIFETIME_HOURS;
pub use errors::TokenError;
