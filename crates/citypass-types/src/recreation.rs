//! Recreation record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recreation venue listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recreation {
    pub recreation_id: i64,
    pub recreation_name: String,
    pub recreation_time_minute: i32,
    pub recreation_price: i32,
    pub position_lat: f64,
    pub position_long: f64,
    pub recreation_city: String,
    pub recreation_image: String,
    pub recreation_description: String,
    pub created_at: DateTime<Utc>,
}

/// Attribute fields supplied by callers when creating a recreation.
///
/// Field names match the wire format, so request bodies deserialize into
/// this directly. Missing fields decode to their zero values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecreationDraft {
    pub recreation_name: String,
    pub recreation_time_minute: i32,
    pub recreation_price: i32,
    pub position_lat: f64,
    pub position_long: f64,
    pub recreation_city: String,
    pub recreation_image: String,
    pub recreation_description: String,
}

impl Recreation {
    /// Build an unsaved recreation from its draft; the store assigns the id
    /// and the authoritative creation timestamp on insert.
    pub fn new(draft: RecreationDraft) -> Self {
        Self {
            recreation_id: 0,
            recreation_name: draft.recreation_name,
            recreation_time_minute: draft.recreation_time_minute,
            recreation_price: draft.recreation_price,
            position_lat: draft.position_lat,
            position_long: draft.position_long,
            recreation_city: draft.recreation_city,
            recreation_image: draft.recreation_image,
            recreation_description: draft.recreation_description,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_fields_carry_over() {
        let draft = RecreationDraft {
            recreation_name: "City Park".into(),
            recreation_time_minute: 90,
            recreation_price: 25000,
            position_lat: -6.2,
            position_long: 106.8,
            recreation_city: "Jakarta".into(),
            recreation_image: "park.jpg".into(),
            recreation_description: "Green space downtown".into(),
        };

        let recreation = Recreation::new(draft.clone());
        assert_eq!(recreation.recreation_id, 0);
        assert_eq!(recreation.recreation_name, draft.recreation_name);
        assert_eq!(recreation.recreation_city, draft.recreation_city);
        assert_eq!(recreation.recreation_price, draft.recreation_price);
    }
}
