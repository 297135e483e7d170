//! Goals service for per-user goal tracking
//!
//! Provides business logic for:
//! - Goal creation with validation
//! - Partial updates merged over the stored goal
//! - Owner-scoped reads and deletes

use crate::error::ApiError;
use crate::repositories::{GoalFields, GoalRecord, GoalRepository};
use fitness_goals_shared::validation::{validate_goal, validate_required, ValidationError};
use fitness_goals_shared::{Goal, GoalRequest};
use std::sync::Arc;
use tracing::{info, instrument};

/// Goals service
#[derive(Clone)]
pub struct GoalsService {
    goals: Arc<dyn GoalRepository>,
}

impl GoalsService {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    /// Create a goal for the user
    #[instrument(skip(self, req))]
    pub async fn create_goal(&self, user_id: i64, req: &GoalRequest) -> Result<Goal, ApiError> {
        let fields = fields_for_create(req)?;
        let record = self.goals.create(user_id, fields).await?;

        info!(goal_id = record.id, "Goal created");
        Ok(record.into())
    }

    /// All goals owned by the user, oldest first
    pub async fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>, ApiError> {
        let records = self.goals.get_by_user(user_id).await?;
        Ok(records.into_iter().map(Goal::from).collect())
    }

    /// A single goal owned by the user
    pub async fn get_goal(&self, user_id: i64, goal_id: i64) -> Result<Goal, ApiError> {
        self.goals
            .get_by_id(goal_id, user_id)
            .await?
            .map(Goal::from)
            .ok_or_else(goal_not_found)
    }

    /// Update a goal owned by the user
    ///
    /// Fields missing from the request keep their stored values; the merged
    /// goal must still satisfy every goal rule.
    #[instrument(skip(self, req))]
    pub async fn update_goal(
        &self,
        user_id: i64,
        goal_id: i64,
        req: &GoalRequest,
    ) -> Result<Goal, ApiError> {
        let existing = self
            .goals
            .get_by_id(goal_id, user_id)
            .await?
            .ok_or_else(goal_not_found)?;

        let fields = merge_fields(&existing, req)?;

        // The goal may have been deleted since it was read.
        let record = self
            .goals
            .update(goal_id, user_id, fields)
            .await?
            .ok_or_else(goal_not_found)?;

        info!(goal_id, "Goal updated");
        Ok(record.into())
    }

    /// Delete a goal owned by the user
    #[instrument(skip(self))]
    pub async fn delete_goal(&self, user_id: i64, goal_id: i64) -> Result<(), ApiError> {
        if !self.goals.delete(goal_id, user_id).await? {
            return Err(goal_not_found());
        }

        info!(goal_id, "Goal deleted");
        Ok(())
    }
}

fn goal_not_found() -> ApiError {
    ApiError::NotFound("Goal not found".to_string())
}

fn fields_for_create(req: &GoalRequest) -> Result<GoalFields, ValidationError> {
    let goal_type = validate_required("type", req.goal_type.as_deref())?;
    let target = req
        .target
        .ok_or_else(|| ValidationError::new("target", "is required"))?;
    let timeframe = validate_required("timeframe", req.timeframe.as_deref())?;
    let current_value = req.current_value.unwrap_or(0.0);

    validate_goal(goal_type, target, timeframe, current_value)?;

    Ok(GoalFields {
        goal_type: goal_type.trim().to_string(),
        target,
        timeframe: timeframe.trim().to_string(),
        current_value,
    })
}

fn merge_fields(existing: &GoalRecord, req: &GoalRequest) -> Result<GoalFields, ValidationError> {
    let goal_type = req.goal_type.as_deref().unwrap_or(&existing.goal_type);
    let target = req.target.unwrap_or(existing.target);
    let timeframe = req.timeframe.as_deref().unwrap_or(&existing.timeframe);
    let current_value = req.current_value.unwrap_or(existing.current_value);

    validate_goal(goal_type, target, timeframe, current_value)?;

    Ok(GoalFields {
        goal_type: goal_type.trim().to_string(),
        target,
        timeframe: timeframe.trim().to_string(),
        current_value,
    })
}
