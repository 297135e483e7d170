//! Goals repository for database operations
//!
//! Every query filters on `user_id`, so a goal owned by someone else is
//! indistinguishable from one that does not exist.

use super::RepoResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_goals_shared::Goal;
use sqlx::PgPool;

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: i64,
    pub user_id: i64,
    pub goal_type: String,
    pub target: f64,
    pub timeframe: String,
    pub current_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal {
            id: record.id,
            user_id: record.user_id,
            goal_type: record.goal_type,
            target: record.target,
            timeframe: record.timeframe,
            current_value: record.current_value,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Validated, user-editable goal fields
#[derive(Debug, Clone, PartialEq)]
pub struct GoalFields {
    pub goal_type: String,
    pub target: f64,
    pub timeframe: String,
    pub current_value: f64,
}

/// Goal store operations, all scoped to an owning user
#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn create(&self, user_id: i64, fields: GoalFields) -> RepoResult<GoalRecord>;
    async fn get_by_id(&self, id: i64, user_id: i64) -> RepoResult<Option<GoalRecord>>;
    /// All goals of a user in insertion order
    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<GoalRecord>>;
    /// Overwrite the goal's fields; `None` when no such goal is owned by `user_id`
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: GoalFields,
    ) -> RepoResult<Option<GoalRecord>>;
    /// `false` when no such goal is owned by `user_id`
    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool>;
}

/// PostgreSQL-backed goal store
#[derive(Clone)]
pub struct PgGoalRepository {
    pool: PgPool,
}

impl PgGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalRepository for PgGoalRepository {
    async fn create(&self, user_id: i64, fields: GoalFields) -> RepoResult<GoalRecord> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO goals (user_id, goal_type, target, timeframe, current_value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, goal_type, target, timeframe, current_value,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.goal_type)
        .bind(fields.target)
        .bind(&fields.timeframe)
        .bind(fields.current_value)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_by_id(&self, id: i64, user_id: i64) -> RepoResult<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, goal_type, target, timeframe, current_value,
                   created_at, updated_at
            FROM goals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<GoalRecord>> {
        let records = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, goal_type, target, timeframe, current_value,
                   created_at, updated_at
            FROM goals
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: GoalFields,
    ) -> RepoResult<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            UPDATE goals SET
                goal_type = $3,
                target = $4,
                timeframe = $5,
                current_value = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, goal_type, target, timeframe, current_value,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&fields.goal_type)
        .bind(fields.target)
        .bind(&fields.timeframe)
        .bind(fields.current_value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(r#"DELETE FROM goals WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
