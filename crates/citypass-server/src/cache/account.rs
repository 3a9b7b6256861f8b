//! Cached account repository

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use citypass_core::Result;
use citypass_types::Account;

use super::tier::{TierCache, LIST_ALL_FIELD};
use crate::storage::{AccountRepository, RemoteCache};

/// Decorator applying the two-tier cache-aside policy to an account store.
pub struct CachedAccountRepository {
    next: Arc<dyn AccountRepository>,
    cache: TierCache,
}

impl CachedAccountRepository {
    pub fn new(
        next: Arc<dyn AccountRepository>,
        remote: Arc<dyn RemoteCache>,
        default_ttl: Duration,
        purge_interval: Duration,
    ) -> Self {
        Self {
            next,
            cache: TierCache::new("accounts", remote, default_ttl, purge_interval),
        }
    }
}

#[async_trait]
impl AccountRepository for CachedAccountRepository {
    async fn create(&self, account: &Account) -> Result<i64> {
        let account_id = self.next.create(account).await?;

        // The new record invalidates every cached listing; the find
        // namespace holds nothing for a brand-new id.
        self.cache.invalidate_listings().await?;

        Ok(account_id)
    }

    async fn find_by_id(&self, account_id: i64) -> Result<Account> {
        self.cache
            .find(account_id, self.next.find_by_id(account_id))
            .await
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        self.cache.list(LIST_ALL_FIELD, self.next.find_all()).await
    }

    async fn update(&self, account: &Account) -> Result<()> {
        self.next.update(account).await?;

        self.cache.invalidate_listings().await?;
        self.cache.evict(account.account_id).await
    }
}
