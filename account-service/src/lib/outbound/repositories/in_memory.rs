use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// User store kept in process memory.
///
/// Behaves like the Postgres store: usernames are unique across all rows
/// (soft-deleted ones included), uniqueness is checked under the write lock,
/// and soft-deleted users are hidden from lookups and listing.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as deleted. Returns false when no active user matched.
    pub async fn soft_delete(&self, username: &Username) -> bool {
        let mut users = self.users.write().await;
        match users
            .iter_mut()
            .find(|u| &u.username == username && !u.is_deleted())
        {
            Some(user) => {
                let now = Utc::now();
                user.deleted_at = Some(now);
                user.updated_at = now;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername(
                user.username.as_str().to_string(),
            ));
        }

        let now = Utc::now();
        let stored = User {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .find(|u| &u.username == username && !u.is_deleted())
            .cloned())
    }

    async fn list(&self, request: &PageRequest) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .filter(|u| !u.is_deleted())
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, UserError> {
        let users = self.users.read().await;

        Ok(users.iter().filter(|u| !u.is_deleted()).count() as u64)
    }
}
