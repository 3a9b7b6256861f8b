//! Restaurant record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A restaurant listing. Same shape as [`crate::Recreation`] with its own
/// wire field names; the two entities are deliberately kept separate types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub restaurant_time_minute: i32,
    pub restaurant_price: i32,
    pub position_lat: f64,
    pub position_long: f64,
    pub restaurant_city: String,
    pub restaurant_image: String,
    pub restaurant_description: String,
    pub created_at: DateTime<Utc>,
}

/// Attribute fields supplied by callers when creating a restaurant.
/// Missing fields decode to their zero values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantDraft {
    pub restaurant_name: String,
    pub restaurant_time_minute: i32,
    pub restaurant_price: i32,
    pub position_lat: f64,
    pub position_long: f64,
    pub restaurant_city: String,
    pub restaurant_image: String,
    pub restaurant_description: String,
}

impl Restaurant {
    /// Build an unsaved restaurant from its draft; the store assigns the id
    /// and the authoritative creation timestamp on insert.
    pub fn new(draft: RestaurantDraft) -> Self {
        Self {
            restaurant_id: 0,
            restaurant_name: draft.restaurant_name,
            restaurant_time_minute: draft.restaurant_time_minute,
            restaurant_price: draft.restaurant_price,
            position_lat: draft.position_lat,
            position_long: draft.position_long,
            restaurant_city: draft.restaurant_city,
            restaurant_image: draft.restaurant_image,
            restaurant_description: draft.restaurant_description,
            created_at: Utc::now(),
        }
    }
}
