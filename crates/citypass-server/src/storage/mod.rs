//! Storage layer
//!
//! Defines the repository contracts plus the three backends that implement
//! or serve them: PostgreSQL adapters, the process-local cache tier, and
//! the shared Redis tier. Every repository implementation is substitutable
//! for any other, so the cache decorators in [`crate::cache`] can wrap the
//! Postgres adapters without the usecase layer noticing.

pub mod local;
pub mod postgres;
pub mod remote;

#[cfg(test)]
pub mod fakes;

pub use local::LocalCache;
pub use postgres::{PgAccountRepository, PgRecreationRepository, PgRestaurantRepository};
pub use remote::{RedisCache, RemoteCache};

use async_trait::async_trait;
use citypass_core::Result;
use citypass_types::{Account, Recreation, Restaurant};

/// Persistence contract for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert the record and return the store-assigned id.
    async fn create(&self, account: &Account) -> Result<i64>;
    async fn find_by_id(&self, account_id: i64) -> Result<Account>;
    async fn find_all(&self) -> Result<Vec<Account>>;
    /// Write the full record back; callers read-modify-write.
    async fn update(&self, account: &Account) -> Result<()>;
}

/// Persistence contract for recreations.
#[async_trait]
pub trait RecreationRepository: Send + Sync {
    async fn create(&self, recreation: &Recreation) -> Result<i64>;
    async fn find_by_id(&self, recreation_id: i64) -> Result<Recreation>;
    async fn find_all(&self) -> Result<Vec<Recreation>>;
    async fn find_by_city(&self, city: &str) -> Result<Vec<Recreation>>;
    async fn delete(&self, recreation_id: i64) -> Result<()>;
}

/// Persistence contract for restaurants.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn create(&self, restaurant: &Restaurant) -> Result<i64>;
    async fn find_by_id(&self, restaurant_id: i64) -> Result<Restaurant>;
    async fn find_all(&self) -> Result<Vec<Restaurant>>;
    async fn find_by_city(&self, city: &str) -> Result<Vec<Restaurant>>;
    async fn delete(&self, restaurant_id: i64) -> Result<()>;
}
