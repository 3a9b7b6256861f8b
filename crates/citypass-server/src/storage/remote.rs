//! Shared remote cache tier (Redis)
//!
//! The cache layer consumes the remote tier through the [`RemoteCache`]
//! trait: hash-field get/set/delete, whole-key delete, and expiration.
//! [`RedisCache`] is the production implementation; tests substitute an
//! in-memory double. Every command carries a deadline so an unresponsive
//! Redis cannot stall a request longer than the configured bound.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use redis::aio::ConnectionManager;

/// Remote key/value cache protocol consumed by the cache layer.
///
/// Values are opaque serialized payloads; the producer and consumer of a
/// namespace agree on the encoding.
#[async_trait]
pub trait RemoteCache: Send + Sync {
    async fn hget(&self, key: &str, field: &str) -> anyhow::Result<Option<Vec<u8>>>;
    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> anyhow::Result<()>;
    async fn hdel(&self, key: &str, field: &str) -> anyhow::Result<()>;
    async fn del(&self, key: &str) -> anyhow::Result<()>;
    async fn expire(&self, key: &str, seconds: i64) -> anyhow::Result<()>;
}

/// Redis-backed [`RemoteCache`] over a multiplexed connection manager.
///
/// The manager reconnects on its own; cloning it per command is the scoped
/// acquisition for this tier.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
    command_timeout: Duration,
}

impl RedisCache {
    /// Connect to Redis, bounding the initial dial.
    pub async fn connect(
        host: &str,
        dial_timeout: Duration,
        command_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = redis::Client::open(format!("redis://{host}"))
            .with_context(|| format!("invalid redis host: {host}"))?;

        let manager = tokio::time::timeout(dial_timeout, ConnectionManager::new(client))
            .await
            .context("redis dial timed out")?
            .context("redis connection failed")?;

        Ok(Self {
            manager,
            command_timeout,
        })
    }

    async fn run<T: redis::FromRedisValue>(&self, cmd: redis::Cmd) -> anyhow::Result<T> {
        let mut conn = self.manager.clone();

        let reply = tokio::time::timeout(self.command_timeout, cmd.query_async(&mut conn))
            .await
            .context("redis command timed out")?
            .context("redis command failed")?;

        Ok(reply)
    }
}

#[async_trait]
impl RemoteCache for RedisCache {
    async fn hget(&self, key: &str, field: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("HGET");
        cmd.arg(key).arg(field);
        self.run(cmd).await
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> anyhow::Result<()> {
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key).arg(field).arg(value);
        self.run(cmd).await
    }

    async fn hdel(&self, key: &str, field: &str) -> anyhow::Result<()> {
        let mut cmd = redis::cmd("HDEL");
        cmd.arg(key).arg(field);
        self.run(cmd).await
    }

    async fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        self.run(cmd).await
    }

    async fn expire(&self, key: &str, seconds: i64) -> anyhow::Result<()> {
        let mut cmd = redis::cmd("EXPIRE");
        cmd.arg(key).arg(seconds);
        self.run(cmd).await
    }
}
