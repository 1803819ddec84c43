use std::env;

use auth::TokenConfig;
use auth::TokenError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::PageDefaults;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

impl JwtConfig {
    /// # Errors
    /// * `InvalidLifetime` - `expiration_hours` does not fit in a duration
    pub fn token_config(&self) -> Result<TokenConfig, TokenError> {
        let lifetime = chrono::Duration::try_hours(self.expiration_hours).ok_or(
            TokenError::InvalidLifetime(self.expiration_hours.saturating_mul(3600)),
        )?;

        Ok(TokenConfig::new(self.secret.clone()).with_lifetime(lifetime))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Accept `?authorization=Bearer <token>` when the header is absent.
    ///
    /// Kept for older clients that cannot set headers. Tokens in URLs end up
    /// in access logs and browser history, so turn this off where possible.
    #[serde(default = "default_query_token_fallback")]
    pub query_token_fallback: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            query_token_fallback: default_query_token_fallback(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    #[serde(default = "default_page_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_page_limit")]
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
            max_limit: default_max_page_limit(),
        }
    }
}

impl PaginationConfig {
    pub fn page_defaults(&self) -> PageDefaults {
        PageDefaults {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    auth::token::DEFAULT_TOKEN_LIFETIME_HOURS
}

fn default_query_token_fallback() -> bool {
    true
}

fn default_page_limit() -> u32 {
    10
}

fn default_max_page_limit() -> u32 {
    100
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
