//! Restaurant store adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use citypass_core::{AppError, Result};
use citypass_types::Restaurant;
use sqlx::PgPool;

use super::run_query;
use crate::storage::RestaurantRepository;

pub struct PgRestaurantRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgRestaurantRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    async fn create(&self, restaurant: &Restaurant) -> Result<i64> {
        let insert = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ms_restaurant (
                restaurant_name, restaurant_time_minute, restaurant_price,
                position_lat, position_long, restaurant_city,
                restaurant_image, restaurant_description, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            RETURNING restaurant_id
            "#,
        )
        .bind(&restaurant.restaurant_name)
        .bind(restaurant.restaurant_time_minute)
        .bind(restaurant.restaurant_price)
        .bind(restaurant.position_lat)
        .bind(restaurant.position_long)
        .bind(&restaurant.restaurant_city)
        .bind(&restaurant.restaurant_image)
        .bind(&restaurant.restaurant_description)
        .fetch_one(&self.pool);

        run_query(self.timeout, "restaurant create", insert).await
    }

    async fn find_by_id(&self, restaurant_id: i64) -> Result<Restaurant> {
        let select = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT restaurant_id, restaurant_name, restaurant_time_minute,
                   restaurant_price, position_lat, position_long, restaurant_city,
                   restaurant_image, restaurant_description, created_at
            FROM ms_restaurant
            WHERE restaurant_id = $1
            "#,
        )
        .bind(restaurant_id)
        .fetch_optional(&self.pool);

        let row = run_query(self.timeout, "restaurant find_by_id", select).await?;
        row.map(Restaurant::from)
            .ok_or(AppError::RestaurantNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        let select = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT restaurant_id, restaurant_name, restaurant_time_minute,
                   restaurant_price, position_lat, position_long, restaurant_city,
                   restaurant_image, restaurant_description, created_at
            FROM ms_restaurant
            "#,
        )
        .fetch_all(&self.pool);

        let rows = run_query(self.timeout, "restaurant find_all", select).await?;
        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Restaurant>> {
        let select = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT restaurant_id, restaurant_name, restaurant_time_minute,
                   restaurant_price, position_lat, position_long, restaurant_city,
                   restaurant_image, restaurant_description, created_at
            FROM ms_restaurant
            WHERE restaurant_city = $1
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool);

        let rows = run_query(self.timeout, "restaurant find_by_city", select).await?;
        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    async fn delete(&self, restaurant_id: i64) -> Result<()> {
        let delete = sqlx::query("DELETE FROM ms_restaurant WHERE restaurant_id = $1")
            .bind(restaurant_id)
            .execute(&self.pool);

        run_query(self.timeout, "restaurant delete", delete).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    restaurant_id: i64,
    restaurant_name: String,
    restaurant_time_minute: i32,
    restaurant_price: i32,
    position_lat: f64,
    position_long: f64,
    restaurant_city: String,
    restaurant_image: String,
    restaurant_description: String,
    created_at: DateTime<Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(r: RestaurantRow) -> Self {
        Restaurant {
            restaurant_id: r.restaurant_id,
            restaurant_name: r.restaurant_name,
            restaurant_time_minute: r.restaurant_time_minute,
            restaurant_price: r.restaurant_price,
            position_lat: r.position_lat,
            position_long: r.position_long,
            restaurant_city: r.restaurant_city,
            restaurant_image: r.restaurant_image,
            restaurant_description: r.restaurant_description,
            created_at: r.created_at,
        }
    }
}
