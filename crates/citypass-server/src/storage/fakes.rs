//! Test doubles for the repository contracts and the remote cache tier
//!
//! The stores count every call so tests can prove which tier served a
//! read; the remote double has failure switches for exercising the cache
//! layer's degradation and invalidation-failure paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use citypass_core::{AppError, Result};
use citypass_types::{Account, Recreation, RecreationDraft, Restaurant, RestaurantDraft};

use super::{AccountRepository, RecreationRepository, RemoteCache, RestaurantRepository};

/// In-memory [`RemoteCache`] double. Expiry is accepted and ignored.
#[derive(Default)]
pub struct InMemoryRemote {
    hashes: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    pub hgets: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl InMemoryRemote {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str, field: &str) -> bool {
        self.hashes
            .lock()
            .unwrap()
            .get(key)
            .map(|hash| hash.contains_key(field))
            .unwrap_or(false)
    }
}

#[async_trait]
impl RemoteCache for InMemoryRemote {
    async fn hget(&self, key: &str, field: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.hgets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("remote cache down"));
        }
        Ok(self
            .hashes
            .lock()
            .unwrap()
            .get(key)
            .and_then(|hash| hash.get(field))
            .cloned())
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("remote cache down"));
        }
        self.hashes
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_vec());
        Ok(())
    }

    async fn hdel(&self, key: &str, field: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("remote cache down"));
        }
        if let Some(hash) = self.hashes.lock().unwrap().get_mut(key) {
            hash.remove(field);
        }
        Ok(())
    }

    async fn del(&self, key: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("remote cache down"));
        }
        self.hashes.lock().unwrap().remove(key);
        Ok(())
    }

    async fn expire(&self, _key: &str, _seconds: i64) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("remote cache down"));
        }
        Ok(())
    }
}

/// Account store double with per-operation call counters.
#[derive(Default)]
pub struct CountingAccountStore {
    records: Mutex<HashMap<i64, Account>>,
    next_id: AtomicI64,
    pub creates: AtomicUsize,
    pub finds: AtomicUsize,
    pub find_alls: AtomicUsize,
    pub updates: AtomicUsize,
}

impl CountingAccountStore {
    /// Insert a record without touching counters, simulating a write that
    /// bypassed the cache layer entirely.
    pub fn insert_direct(&self, account: Account) {
        self.records
            .lock()
            .unwrap()
            .insert(account.account_id, account);
    }

    pub fn get_direct(&self, account_id: i64) -> Option<Account> {
        self.records.lock().unwrap().get(&account_id).cloned()
    }
}

#[async_trait]
impl AccountRepository for CountingAccountStore {
    async fn create(&self, account: &Account) -> Result<i64> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = account.clone();
        stored.account_id = id;
        self.records.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, account_id: i64) -> Result<Account> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .ok_or(AppError::AccountNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        self.find_alls.fetch_add(1, Ordering::SeqCst);
        let mut accounts: Vec<Account> = self.records.lock().unwrap().values().cloned().collect();
        accounts.sort_by_key(|a| a.account_id);
        Ok(accounts)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(account.account_id, account.clone());
        Ok(())
    }
}

/// Recreation store double with per-operation call counters.
#[derive(Default)]
pub struct CountingRecreationStore {
    records: Mutex<HashMap<i64, Recreation>>,
    next_id: AtomicI64,
    pub finds: AtomicUsize,
    pub find_alls: AtomicUsize,
    pub finds_by_city: AtomicUsize,
    pub deletes: AtomicUsize,
}

#[async_trait]
impl RecreationRepository for CountingRecreationStore {
    async fn create(&self, recreation: &Recreation) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = recreation.clone();
        stored.recreation_id = id;
        self.records.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, recreation_id: i64) -> Result<Recreation> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(&recreation_id)
            .cloned()
            .ok_or(AppError::RecreationNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Recreation>> {
        self.find_alls.fetch_add(1, Ordering::SeqCst);
        let mut recreations: Vec<Recreation> =
            self.records.lock().unwrap().values().cloned().collect();
        recreations.sort_by_key(|r| r.recreation_id);
        Ok(recreations)
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Recreation>> {
        self.finds_by_city.fetch_add(1, Ordering::SeqCst);
        let mut recreations: Vec<Recreation> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.recreation_city == city)
            .cloned()
            .collect();
        recreations.sort_by_key(|r| r.recreation_id);
        Ok(recreations)
    }

    async fn delete(&self, recreation_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().remove(&recreation_id);
        Ok(())
    }
}

/// Restaurant store double, mirror of the recreation one.
#[derive(Default)]
pub struct CountingRestaurantStore {
    records: Mutex<HashMap<i64, Restaurant>>,
    next_id: AtomicI64,
    pub finds: AtomicUsize,
    pub deletes: AtomicUsize,
}

#[async_trait]
impl RestaurantRepository for CountingRestaurantStore {
    async fn create(&self, restaurant: &Restaurant) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = restaurant.clone();
        stored.restaurant_id = id;
        self.records.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, restaurant_id: i64) -> Result<Restaurant> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(&restaurant_id)
            .cloned()
            .ok_or(AppError::RestaurantNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> =
            self.records.lock().unwrap().values().cloned().collect();
        restaurants.sort_by_key(|r| r.restaurant_id);
        Ok(restaurants)
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.restaurant_city == city)
            .cloned()
            .collect();
        restaurants.sort_by_key(|r| r.restaurant_id);
        Ok(restaurants)
    }

    async fn delete(&self, restaurant_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().remove(&restaurant_id);
        Ok(())
    }
}

pub fn sample_recreation_draft(city: &str) -> RecreationDraft {
    RecreationDraft {
        recreation_name: "City Park".to_string(),
        recreation_time_minute: 90,
        recreation_price: 25000,
        position_lat: -6.2,
        position_long: 106.8,
        recreation_city: city.to_string(),
        recreation_image: "park.jpg".to_string(),
        recreation_description: "Green space downtown".to_string(),
    }
}

pub fn sample_restaurant_draft(city: &str) -> RestaurantDraft {
    RestaurantDraft {
        restaurant_name: "Warung Tepi".to_string(),
        restaurant_time_minute: 45,
        restaurant_price: 60000,
        position_lat: -6.9,
        position_long: 107.6,
        restaurant_city: city.to_string(),
        restaurant_image: "warung.jpg".to_string(),
        restaurant_description: "Street-side kitchen".to_string(),
    }
}
