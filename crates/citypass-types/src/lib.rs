//! Domain records shared by every citypass layer.
//!
//! These structs carry the exact JSON field names used on the wire and in
//! the cache tiers, so a record serialized by one layer round-trips through
//! any other.

mod account;
mod recreation;
mod restaurant;

pub use account::Account;
pub use recreation::{Recreation, RecreationDraft};
pub use restaurant::{Restaurant, RestaurantDraft};
