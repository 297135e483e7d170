//! User repository for database operations

use super::{classify_write_error, RepoResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_goals_shared::User;
use sqlx::PgPool;

/// User record from database
///
/// Carries the password hash; convert with [`UserRecord::into_public`]
/// before handing a user to anything outside the service layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public view of the user, without the password hash
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Input for updating profile fields; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// User directory operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken email is `RepositoryError::UniqueViolation`
    async fn create(&self, input: NewUser) -> RepoResult<UserRecord>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>>;
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;
    /// Update profile fields, returning `None` when the user does not exist
    async fn update_profile(&self, id: i64, updates: UpdateUser) -> RepoResult<Option<UserRecord>>;
}

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> RepoResult<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_profile(&self, id: i64, updates: UpdateUser) -> RepoResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(user)
    }
}
