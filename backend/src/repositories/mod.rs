//! Database repositories
//!
//! Provides the data access layer. Each store is an `async_trait` so that
//! services can be built over PostgreSQL in production and over in-memory
//! stores in tests. Every goal query is scoped by the owning user id.

pub mod goals;
#[cfg(test)]
pub mod memory;
pub mod user;

use thiserror::Error;

pub use goals::{GoalFields, GoalRecord, GoalRepository, PgGoalRepository};
pub use user::{NewUser, PgUserRepository, UpdateUser, UserRecord, UserRepository};

/// Repository error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Classify a write error, separating unique-constraint violations
pub(crate) fn classify_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return RepositoryError::UniqueViolation(constraint);
        }
    }
    RepositoryError::Database(err)
}
