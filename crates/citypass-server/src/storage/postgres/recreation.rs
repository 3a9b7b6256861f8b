//! Recreation store adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use citypass_core::{AppError, Result};
use citypass_types::Recreation;
use sqlx::PgPool;

use super::run_query;
use crate::storage::RecreationRepository;

pub struct PgRecreationRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgRecreationRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl RecreationRepository for PgRecreationRepository {
    async fn create(&self, recreation: &Recreation) -> Result<i64> {
        let insert = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ms_recreation (
                recreation_name, recreation_time_minute, recreation_price,
                position_lat, position_long, recreation_city,
                recreation_image, recreation_description, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            RETURNING recreation_id
            "#,
        )
        .bind(&recreation.recreation_name)
        .bind(recreation.recreation_time_minute)
        .bind(recreation.recreation_price)
        .bind(recreation.position_lat)
        .bind(recreation.position_long)
        .bind(&recreation.recreation_city)
        .bind(&recreation.recreation_image)
        .bind(&recreation.recreation_description)
        .fetch_one(&self.pool);

        run_query(self.timeout, "recreation create", insert).await
    }

    async fn find_by_id(&self, recreation_id: i64) -> Result<Recreation> {
        let select = sqlx::query_as::<_, RecreationRow>(
            r#"
            SELECT recreation_id, recreation_name, recreation_time_minute,
                   recreation_price, position_lat, position_long, recreation_city,
                   recreation_image, recreation_description, created_at
            FROM ms_recreation
            WHERE recreation_id = $1
            "#,
        )
        .bind(recreation_id)
        .fetch_optional(&self.pool);

        let row = run_query(self.timeout, "recreation find_by_id", select).await?;
        row.map(Recreation::from)
            .ok_or(AppError::RecreationNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Recreation>> {
        let select = sqlx::query_as::<_, RecreationRow>(
            r#"
            SELECT recreation_id, recreation_name, recreation_time_minute,
                   recreation_price, position_lat, position_long, recreation_city,
                   recreation_image, recreation_description, created_at
            FROM ms_recreation
            "#,
        )
        .fetch_all(&self.pool);

        let rows = run_query(self.timeout, "recreation find_all", select).await?;
        Ok(rows.into_iter().map(Recreation::from).collect())
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Recreation>> {
        let select = sqlx::query_as::<_, RecreationRow>(
            r#"
            SELECT recreation_id, recreation_name, recreation_time_minute,
                   recreation_price, position_lat, position_long, recreation_city,
                   recreation_image, recreation_description, created_at
            FROM ms_recreation
            WHERE recreation_city = $1
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool);

        let rows = run_query(self.timeout, "recreation find_by_city", select).await?;
        Ok(rows.into_iter().map(Recreation::from).collect())
    }

    async fn delete(&self, recreation_id: i64) -> Result<()> {
        let delete = sqlx::query("DELETE FROM ms_recreation WHERE recreation_id = $1")
            .bind(recreation_id)
            .execute(&self.pool);

        run_query(self.timeout, "recreation delete", delete).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RecreationRow {
    recreation_id: i64,
    recreation_name: String,
    recreation_time_minute: i32,
    recreation_price: i32,
    position_lat: f64,
    position_long: f64,
    recreation_city: String,
    recreation_image: String,
    recreation_description: String,
    created_at: DateTime<Utc>,
}

impl From<RecreationRow> for Recreation {
    fn from(r: RecreationRow) -> Self {
        Recreation {
            recreation_id: r.recreation_id,
            recreation_name: r.recreation_name,
            recreation_time_minute: r.recreation_time_minute,
            recreation_price: r.recreation_price,
            position_lat: r.position_lat,
            position_long: r.position_long,
            recreation_city: r.recreation_city,
            recreation_image: r.recreation_image,
            recreation_description: r.recreation_description,
            created_at: r.created_at,
        }
    }
}
