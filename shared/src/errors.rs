//! Error types for the Fitness Goals application

use thiserror::Error;

/// Authentication error types
///
/// Every variant maps to `401 Unauthorized` at the HTTP boundary. Unknown
/// emails and wrong passwords both surface as `InvalidCredentials` so a
/// caller cannot tell which one happened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,

    #[error("Not authenticated")]
    NotAuthenticated,
}
