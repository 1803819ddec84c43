//! Authentication core shared by the account service.
//!
//! - Password hashing (Argon2id, fresh salt per hash, constant-time verify)
//! - Signed, time-bound access tokens (HS256 JWT)
//! - An `Authenticator` facade combining both
//!
//! Nothing in this crate reads the environment: the signing secret and token
//! lifetime arrive through [`TokenConfig`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenConfig};
//!
//! let codec = TokenCodec::new(TokenConfig::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let token = codec.issue("alice").unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(codec.extract_subject(&claims).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenConfig};
//!
//! let auth = Authenticator::new(TokenConfig::new("secret_key_at_least_32_bytes_long!")).unwrap();
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Protected request: verify token
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.subject(), Some("alice"));
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenCodec;
pub use token::TokenConfig;
pub use token::TokenError;
