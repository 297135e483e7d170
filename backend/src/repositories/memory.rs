//! In-memory repositories for tests
//!
//! Mirror the PostgreSQL semantics that services rely on: store-assigned
//! positive ids, unique emails, owner-scoped goal access and insertion
//! ordering.

use super::{
    GoalFields, GoalRecord, GoalRepository, NewUser, RepoResult, RepositoryError, UpdateUser,
    UserRecord, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Table<UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> RepoResult<UserRecord> {
        let mut table = self.users.write().await;
        if table.rows.values().any(|u| u.email == input.email) {
            return Err(RepositoryError::UniqueViolation("users_email_key".to_string()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: table.allocate_id(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let table = self.users.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        let table = self.users.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let table = self.users.read().await;
        Ok(table.rows.values().any(|u| u.email == email))
    }

    async fn update_profile(&self, id: i64, updates: UpdateUser) -> RepoResult<Option<UserRecord>> {
        let mut table = self.users.write().await;

        if let Some(email) = &updates.email {
            if table.rows.values().any(|u| u.id != id && &u.email == email) {
                return Err(RepositoryError::UniqueViolation("users_email_key".to_string()));
            }
        }

        let Some(record) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = updates.name {
            record.name = name;
        }
        if let Some(email) = updates.email {
            record.email = email;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }
}

/// In-memory goal store
#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: RwLock<Table<GoalRecord>>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn create(&self, user_id: i64, fields: GoalFields) -> RepoResult<GoalRecord> {
        let mut table = self.goals.write().await;
        let now = Utc::now();
        let record = GoalRecord {
            id: table.allocate_id(),
            user_id,
            goal_type: fields.goal_type,
            target: fields.target,
            timeframe: fields.timeframe,
            current_value: fields.current_value,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64, user_id: i64) -> RepoResult<Option<GoalRecord>> {
        let table = self.goals.read().await;
        Ok(table.rows.get(&id).filter(|g| g.user_id == user_id).cloned())
    }

    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<GoalRecord>> {
        let table = self.goals.read().await;
        Ok(table
            .rows
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: GoalFields,
    ) -> RepoResult<Option<GoalRecord>> {
        let mut table = self.goals.write().await;
        let Some(record) = table.rows.get_mut(&id).filter(|g| g.user_id == user_id) else {
            return Ok(None);
        };

        record.goal_type = fields.goal_type;
        record.target = fields.target;
        record.timeframe = fields.timeframe;
        record.current_value = fields.current_value;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let mut table = self.goals.write().await;
        let owned = table.rows.get(&id).is_some_and(|g| g.user_id == user_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }
}
