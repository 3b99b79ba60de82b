//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_entity::analytics::CountBucket;
use eventhub_entity::user::{CreateUser, UpdateUser, User};

use crate::store::UserStore;

/// Unique constraint on `users.email`.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Repository for account rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write failure, turning the email constraint into a conflict.
fn write_error(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return AppError::conflict("User already exists, please login");
        }
    }
    AppError::with_source(ErrorKind::Database, message.to_string(), e)
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, department, role) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.department)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create user"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn list(&self, department: Option<&str>) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::text IS NULL OR department = $1) \
             ORDER BY created_at, id",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                department = COALESCE($3, department), \
                email = COALESCE($4, email), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.department)
        .bind(&data.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update user"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_email_prefix(&self, prefix: &str, limit: u64) -> AppResult<Vec<User>> {
        let escaped = prefix
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email LIKE $1 || '%' ORDER BY email LIMIT $2",
        )
        .bind(escaped)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search users", e))
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET reset_password_token = $2, reset_password_expire = $3, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(digest)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store reset token", e))?;
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET reset_password_token = NULL, reset_password_expire = NULL, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear reset token", e))?;
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        digest: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET password_hash = $3, reset_password_token = NULL, \
                reset_password_expire = NULL, updated_at = NOW() \
             WHERE reset_password_token = $1 AND reset_password_expire > $2 \
             RETURNING *",
        )
        .bind(digest)
        .bind(now)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset password", e))
    }

    async fn department_distribution(&self) -> AppResult<Vec<CountBucket>> {
        sqlx::query_as::<_, CountBucket>(
            "SELECT department AS name, COUNT(*) AS value FROM users \
             GROUP BY department ORDER BY value DESC, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users by department", e)
        })
    }
}
