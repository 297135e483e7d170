//! Authentication extractor
//!
//! Resolves `Authorization: Bearer <token>` into the caller's user id.
//! Handlers that take [`AuthUser`] never run for a request whose token is
//! missing, malformed, forged or expired.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use fitness_goals_shared::AuthError;
use tracing::debug;

/// Authenticated user extracted from the session token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "Request without bearer token");
            AuthError::MissingToken
        })?;

        let user_id = app_state.jwt().verify(token)?;

        Ok(AuthUser { user_id })
    }
}

/// Token part of a `Bearer` authorization header, if any
fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))?
        .trim();

    (!token.is_empty()).then_some(token)
}
