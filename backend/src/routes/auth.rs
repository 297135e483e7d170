//! Authentication routes
//!
//! Provides endpoints for user registration, login and the caller's profile.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fitness_goals_shared::types::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserSummary,
};
use fitness_goals_shared::{AuthError, User};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile).put(update_profile))
}

/// Register a new user
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.auth().register(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserSummary {
                id: user.id,
                name: user.name,
            },
        }),
    ))
}

/// Login with email and password
///
/// POST /auth/login
///
/// Every failure, an unreadable body included, is `401 Invalid credentials`.
async fn login(
    State(state): State<AppState>,
    body: Result<ApiJson<LoginRequest>, ApiError>,
) -> ApiResult<Json<LoginResponse>> {
    let ApiJson(req) = body.map_err(|_| AuthError::InvalidCredentials)?;
    let token = state.auth().login(&req).await?;
    Ok(Json(LoginResponse { token }))
}

/// Get current user profile
///
/// GET /auth/profile
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn get_profile(State(state): State<AppState>, auth_user: AuthUser) -> ApiResult<Json<User>> {
    let user = state.auth().get_profile(auth_user.user_id).await?;
    Ok(Json(user))
}

/// Update name and/or email of the current user
///
/// PUT /auth/profile
async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth().update_profile(auth_user.user_id, &req).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}
