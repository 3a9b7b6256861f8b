//! Cached restaurant repository

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use citypass_core::Result;
use citypass_types::Restaurant;

use super::tier::{filter_field, TierCache, LIST_ALL_FIELD};
use crate::storage::{RemoteCache, RestaurantRepository};

/// Decorator applying the two-tier cache-aside policy to a restaurant
/// store. Same policy as the other entities, including city listings under
/// prefixed fields in the listing namespace.
pub struct CachedRestaurantRepository {
    next: Arc<dyn RestaurantRepository>,
    cache: TierCache,
}

impl CachedRestaurantRepository {
    pub fn new(
        next: Arc<dyn RestaurantRepository>,
        remote: Arc<dyn RemoteCache>,
        default_ttl: Duration,
        purge_interval: Duration,
    ) -> Self {
        Self {
            next,
            cache: TierCache::new("restaurants", remote, default_ttl, purge_interval),
        }
    }
}

#[async_trait]
impl RestaurantRepository for CachedRestaurantRepository {
    async fn create(&self, restaurant: &Restaurant) -> Result<i64> {
        let restaurant_id = self.next.create(restaurant).await?;

        self.cache.invalidate_listings().await?;

        Ok(restaurant_id)
    }

    async fn find_by_id(&self, restaurant_id: i64) -> Result<Restaurant> {
        self.cache
            .find(restaurant_id, self.next.find_by_id(restaurant_id))
            .await
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        self.cache.list(LIST_ALL_FIELD, self.next.find_all()).await
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Restaurant>> {
        self.cache
            .list(&filter_field(city), self.next.find_by_city(city))
            .await
    }

    async fn delete(&self, restaurant_id: i64) -> Result<()> {
        self.next.delete(restaurant_id).await?;

        self.cache.invalidate_listings().await?;
        self.cache.evict(restaurant_id).await
    }
}
