//! PostgreSQL adapters for the repository contracts
//!
//! Parameterized queries only; every call is bounded by the configured
//! per-call timeout. Row absence maps to the typed not-found errors, which
//! the cache layer relies on to avoid caching negative results. All other
//! failures (including timeouts) surface as `Internal`.

mod account;
mod recreation;
mod restaurant;

pub use account::PgAccountRepository;
pub use recreation::PgRecreationRepository;
pub use restaurant::PgRestaurantRepository;

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use citypass_core::{AppError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to PostgreSQL and ensure the schema exists.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("failed to connect to PostgreSQL")?;

    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(pool)
}

async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            account_id BIGSERIAL PRIMARY KEY,
            user_email TEXT NOT NULL,
            user_fullname TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ms_recreation (
            recreation_id BIGSERIAL PRIMARY KEY,
            recreation_name TEXT NOT NULL,
            recreation_time_minute INTEGER NOT NULL DEFAULT 0,
            recreation_price INTEGER NOT NULL DEFAULT 0,
            position_lat DOUBLE PRECISION NOT NULL DEFAULT 0,
            position_long DOUBLE PRECISION NOT NULL DEFAULT 0,
            recreation_city TEXT NOT NULL DEFAULT '',
            recreation_image TEXT NOT NULL DEFAULT '',
            recreation_description TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ms_restaurant (
            restaurant_id BIGSERIAL PRIMARY KEY,
            restaurant_name TEXT NOT NULL,
            restaurant_time_minute INTEGER NOT NULL DEFAULT 0,
            restaurant_price INTEGER NOT NULL DEFAULT 0,
            position_lat DOUBLE PRECISION NOT NULL DEFAULT 0,
            position_long DOUBLE PRECISION NOT NULL DEFAULT 0,
            restaurant_city TEXT NOT NULL DEFAULT '',
            restaurant_image TEXT NOT NULL DEFAULT '',
            restaurant_description TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Run one store call under the configured deadline, mapping both query
/// failures and timeouts to `Internal`.
pub(crate) async fn run_query<T, F>(timeout: Duration, operation: &str, query: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, query).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::error!(operation, %err, "store query failed");
            Err(AppError::Internal)
        }
        Err(_) => {
            tracing::error!(operation, timeout_ms = timeout.as_millis() as u64, "store query timed out");
            Err(AppError::Internal)
        }
    }
}
