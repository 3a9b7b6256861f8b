//! Two-tier cache-aside layer
//!
//! Decorators that wrap a repository with a process-local cache in front of
//! the shared Redis tier. Reads populate both tiers lazily; writes go to
//! the store first and then invalidate the affected entries in both tiers.
//! Each decorator implements the same repository contract it wraps, so the
//! usecase layer cannot tell cache from store.
//!
//! The window between a committed store write and the completed
//! invalidation is not atomic; a concurrent reader can repopulate a tier
//! with the pre-write value. Staleness from that race is bounded by the
//! one-hour expiry on the remote hashes.

mod account;
mod recreation;
mod restaurant;
mod tier;


pub use account::CachedAccountRepository;
pub use recreation::CachedRecreationRepository;
pub use restaurant::CachedRestaurantRepository;
pub use tier::{TierCache, LIST_ALL_FIELD};
