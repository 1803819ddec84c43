use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::FullNameError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account as the user store returns it. The
/// password hash is carried for login verification only; the type has no
/// `Serialize` impl, so responses go through dedicated DTOs.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub fullname: FullName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Draft of a user handed to the store for creation.
///
/// The identity is chosen by the caller; timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    pub fullname: FullName,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// At least 2 characters, any characters allowed.
/// Case-sensitive: `Alice` and `alice` are different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 2;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 2 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        Ok(Self(username))
    }

    /// Wrap a username read back from the user store.
    ///
    /// Stored rows are not re-validated, so rows written under older rules
    /// still load.
    pub(crate) fn from_stored(username: String) -> Self {
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a user.
///
/// Surrounding whitespace is trimmed; the result must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(fullname: String) -> Result<Self, FullNameError> {
        let trimmed = fullname.trim();
        if trimmed.is_empty() {
            return Err(FullNameError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a full name read back from the user store, without validation.
    pub(crate) fn from_stored(fullname: String) -> Self {
        Self(fullname)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Defaults applied when a listing request leaves paging unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Normalized paging parameters for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request from raw, possibly missing, query values.
    ///
    /// A page below 1 becomes 1. A missing or non-positive limit falls back
    /// to the default limit; a limit above the maximum is capped.
    pub fn new(page: Option<i64>, limit: Option<i64>, defaults: PageDefaults) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);

        let limit = limit
            .filter(|l| *l >= 1)
            .map(|l| l.min(defaults.max_limit as i64) as u32)
            .unwrap_or(defaults.default_limit)
            .clamp(1, defaults.max_limit.max(1));

        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of a listing together with the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total,
        }
    }

    pub fn previous_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.total > self.page as u64 * self.limit as u64).then(|| self.page + 1)
    }
}
