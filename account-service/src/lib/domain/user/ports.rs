use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user listing operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// List active users one page at a time.
    ///
    /// # Arguments
    /// * `request` - Normalized page number and size
    ///
    /// # Returns
    /// Page of users plus the total number of active users
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Soft-deleted users are invisible to every method.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `user` - Draft with identity, username, full name and password hash
    ///
    /// # Returns
    /// Stored user with store-assigned timestamps
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken (uniqueness enforced by the store)
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by username (exact, case-sensitive match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve one page of users, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, request: &PageRequest) -> Result<Vec<User>, UserError>;

    /// Count all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<u64, UserError>;
}
