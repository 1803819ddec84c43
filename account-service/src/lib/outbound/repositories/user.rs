use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::FullName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let id: Uuid = row.try_get("id").map_err(Self::database_error)?;
        let username: String = row.try_get("username").map_err(Self::database_error)?;
        let fullname: String = row.try_get("fullname").map_err(Self::database_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(Self::database_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(Self::database_error)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(Self::database_error)?;
        let deleted_at: Option<DateTime<Utc>> =
            row.try_get("deleted_at").map_err(Self::database_error)?;

        Ok(User {
            id: UserId(id),
            username: Username::from_stored(username),
            fullname: FullName::from_stored(fullname),
            password_hash,
            created_at,
            updated_at,
            deleted_at,
        })
    }

    fn database_error(e: sqlx::Error) -> UserError {
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, username, fullname, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, fullname, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.fullname.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return UserError::DuplicateUsername(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, fullname, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE username = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self, request: &PageRequest) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, fullname, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY created_at ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.limit() as i64)
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::database_error)?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn count(&self) -> Result<u64, UserError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(Self::database_error)?;

        Ok(total.max(0) as u64)
    }
}
