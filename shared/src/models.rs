//! Data models for the Fitness Goals application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as seen by callers
///
/// The password hash is deliberately absent: it never leaves the
/// repository layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fitness goal owned by a single user
///
/// Invariant: `0 <= current_value <= target` and `target > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: f64,
    pub timeframe: String,
    pub current_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
