//! Goal routes
//!
//! CRUD over the caller's goals. Every handler requires a Bearer token and
//! only ever sees goals owned by the authenticated user.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fitness_goals_shared::{Goal, GoalRequest};

/// Create goal routes
pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
}

/// Parse a goal id path segment
fn parse_goal_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::Validation("Goal id must be an integer".to_string()))
}

/// POST /goals
async fn create_goal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<GoalRequest>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goals().create_goal(auth_user.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /goals
async fn list_goals(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goals().list_goals(auth_user.user_id).await?;
    Ok(Json(goals))
}

/// GET /goals/:id
async fn get_goal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Goal>> {
    let goal_id = parse_goal_id(&id)?;
    let goal = state.goals().get_goal(auth_user.user_id, goal_id).await?;
    Ok(Json(goal))
}

/// PUT /goals/:id
///
/// Absent fields keep their stored values.
async fn update_goal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<GoalRequest>,
) -> ApiResult<Json<Goal>> {
    let goal_id = parse_goal_id(&id)?;
    let goal = state
        .goals()
        .update_goal(auth_user.user_id, goal_id, &req)
        .await?;
    Ok(Json(goal))
}

/// DELETE /goals/:id
async fn delete_goal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let goal_id = parse_goal_id(&id)?;
    state.goals().delete_goal(auth_user.user_id, goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
