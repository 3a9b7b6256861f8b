//! Cached recreation repository

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use citypass_core::Result;
use citypass_types::Recreation;

use super::tier::{filter_field, TierCache, LIST_ALL_FIELD};
use crate::storage::{RecreationRepository, RemoteCache};

/// Decorator applying the two-tier cache-aside policy to a recreation
/// store. City-filtered listings share the listing namespace under prefixed
/// fields, so one invalidation covers them along with the full listing.
pub struct CachedRecreationRepository {
    next: Arc<dyn RecreationRepository>,
    cache: TierCache,
}

impl CachedRecreationRepository {
    pub fn new(
        next: Arc<dyn RecreationRepository>,
        remote: Arc<dyn RemoteCache>,
        default_ttl: Duration,
        purge_interval: Duration,
    ) -> Self {
        Self {
            next,
            cache: TierCache::new("recreations", remote, default_ttl, purge_interval),
        }
    }
}

#[async_trait]
impl RecreationRepository for CachedRecreationRepository {
    async fn create(&self, recreation: &Recreation) -> Result<i64> {
        let recreation_id = self.next.create(recreation).await?;

        self.cache.invalidate_listings().await?;

        Ok(recreation_id)
    }

    async fn find_by_id(&self, recreation_id: i64) -> Result<Recreation> {
        self.cache
            .find(recreation_id, self.next.find_by_id(recreation_id))
            .await
    }

    async fn find_all(&self) -> Result<Vec<Recreation>> {
        self.cache.list(LIST_ALL_FIELD, self.next.find_all()).await
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Recreation>> {
        self.cache
            .list(&filter_field(city), self.next.find_by_city(city))
            .await
    }

    async fn delete(&self, recreation_id: i64) -> Result<()> {
        self.next.delete(recreation_id).await?;

        self.cache.invalidate_listings().await?;
        self.cache.evict(recreation_id).await
    }
}
