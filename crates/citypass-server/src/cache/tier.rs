//! Generic two-tier cache-aside mechanism
//!
//! One `TierCache` instance serves one entity type and owns its two cache
//! namespaces: `<entity>:find` for single records keyed by id, and
//! `<entity>:find_all` for collections keyed by `"*"` (or by a prefixed
//! filter field for city-filtered listings). Each namespace is a Redis hash whose expiry is
//! reset to one hour whenever it is repopulated, plus a process-local cache
//! with its own shorter TTL.
//!
//! Failure policy: remote-tier trouble on the read path degrades to the
//! store (a failed HGET falls through, failed population is logged and
//! dropped), while invalidation failures on the write path surface as
//! `Internal` so the caller knows the tiers may still hold pre-write data.
//! Store errors always propagate untouched, and not-found results are never
//! written to either tier.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use citypass_core::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::{LocalCache, RemoteCache};

/// Expiry reset on a remote hash whenever a field is written.
const REMOTE_TTL_SECS: i64 = 3600;

/// Hash field under which an unfiltered collection is cached.
pub const LIST_ALL_FIELD: &str = "*";

/// Hash field for a listing filtered by `value`. The prefix keeps filter
/// values out of the sentinel's namespace; a filter literally equal to
/// [`LIST_ALL_FIELD`] must not alias the full listing.
pub fn filter_field(value: &str) -> String {
    format!("filter:{value}")
}

/// Two cache tiers in front of one entity's store, shared by that entity's
/// repository decorator.
pub struct TierCache {
    remote: Arc<dyn RemoteCache>,
    find_key: String,
    list_key: String,
    local_find: LocalCache,
    local_list: LocalCache,
}

impl TierCache {
    /// Build the tiers for `entity` (e.g. `"accounts"`), which becomes the
    /// namespace prefix in both tiers.
    pub fn new(
        entity: &str,
        remote: Arc<dyn RemoteCache>,
        default_ttl: Duration,
        purge_interval: Duration,
    ) -> Self {
        Self {
            find_key: format!("{entity}:find"),
            list_key: format!("{entity}:find_all"),
            local_find: LocalCache::new(default_ttl, purge_interval),
            local_list: LocalCache::new(default_ttl, purge_interval),
            remote,
        }
    }

    /// Read-through lookup of a single record. `load` is awaited only when
    /// both tiers miss.
    pub async fn find<T, F>(&self, id: i64, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>> + Send,
    {
        self.read_through(&self.find_key, &self.local_find, &id.to_string(), load)
            .await
    }

    /// Read-through lookup of a collection. `field` is [`LIST_ALL_FIELD`]
    /// for the full listing or a [`filter_field`] for a filtered one.
    pub async fn list<T, F>(&self, field: &str, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>> + Send,
    {
        self.read_through(&self.list_key, &self.local_list, field, load)
            .await
    }

    async fn read_through<T, F>(
        &self,
        key: &str,
        local: &LocalCache,
        field: &str,
        load: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>> + Send,
    {
        // Local hit: no I/O at all.
        if let Some(bytes) = local.get(field) {
            return decode(key, &bytes);
        }

        match self.remote.hget(key, field).await {
            Ok(Some(bytes)) => {
                let value = decode(key, &bytes)?;
                local.set(field.to_string(), bytes);
                return Ok(value);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key, field, %err, "remote cache read failed, falling through to store");
            }
        }

        // Store errors (including not-found) propagate without touching
        // either tier.
        let value = load.await?;

        let bytes = encode(key, &value)?;
        if let Err(err) = self.populate_remote(key, field, &bytes).await {
            tracing::warn!(key, field, %err, "remote cache populate failed");
        }
        local.set(field.to_string(), bytes);

        Ok(value)
    }

    async fn populate_remote(&self, key: &str, field: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.remote.hset(key, field, bytes).await?;
        self.remote.expire(key, REMOTE_TTL_SECS).await
    }

    /// Drop every cached listing in both tiers. Called after any store
    /// write, since any previously cached collection may now be stale.
    /// Idempotent: clearing empty namespaces succeeds.
    pub async fn invalidate_listings(&self) -> Result<()> {
        if let Err(err) = self.remote.del(&self.list_key).await {
            tracing::error!(key = %self.list_key, %err, "listing invalidation failed");
            return Err(AppError::Internal);
        }

        self.local_list.flush();
        Ok(())
    }

    /// Evict one record from both tiers of the find namespace. Idempotent.
    pub async fn evict(&self, id: i64) -> Result<()> {
        let field = id.to_string();

        if let Err(err) = self.remote.hdel(&self.find_key, &field).await {
            tracing::error!(key = %self.find_key, field, %err, "record eviction failed");
            return Err(AppError::Internal);
        }

        self.local_find.delete(&field);
        Ok(())
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|err| {
        tracing::error!(key, %err, "cache entry encode failed");
        AppError::Internal
    })
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|err| {
        tracing::error!(key, %err, "cache entry decode failed");
        AppError::Internal
    })
}
