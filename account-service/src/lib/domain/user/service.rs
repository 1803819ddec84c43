use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service for read-side user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, UserError> {
        let users = self.repository.list(&request).await?;
        let total = self.repository.count().await?;

        tracing::debug!(
            page = request.page(),
            limit = request.limit(),
            returned = users.len(),
            total,
            "Listed users"
        );

        Ok(Page::new(users, request, total))
    }
}
