//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting typed service errors to HTTP responses. Infrastructure
//! failures are logged here and reach the client only as a generic message.

use crate::auth::HashingError;
use crate::repositories::RepositoryError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitness_goals_shared::validation::ValidationError;
use fitness_goals_shared::{AuthError, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Hashing error")]
    Hashing(#[from] HashingError),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.user_message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation(_) => {
                ApiError::Conflict("Email already registered".to_string())
            }
            RepositoryError::Database(e) => ApiError::Database(e),
        }
    }
}

impl ApiError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Authentication(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            // Duplicate registrations are reported as bad requests
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Hashing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            ApiError::Validation(msg) | ApiError::Conflict(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::Authentication(err) => err.to_string(),
            ApiError::Hashing(err) => {
                error!("Hashing error: {:?}", err);
                "An internal error occurred".to_string()
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                "A database error occurred".to_string()
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
        };

        let body = Json(ErrorResponse {
            message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor whose rejections use the API error body
///
/// Wrong-typed fields, malformed JSON and a missing `Content-Type` all
/// become `400 {message, code}`.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
