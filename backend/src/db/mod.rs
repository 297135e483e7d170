//! PostgreSQL pool, embedded migrations and the readiness query

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Idle connections are closed after ten minutes
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Connections are recycled after half an hour
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// Connect a pool sized and timed by the database section of the config
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)?.application_name("fitness-goals");

    let pool = pool_options(config).connect_with(connect_options).await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply the migrations under `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// `SELECT 1` against the pool
pub async fn health_check(pool: &PgPool) -> Result<()> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!("Database health check failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
