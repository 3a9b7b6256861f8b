//! Account record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account.
///
/// `account_id` is assigned by the store on creation and is 0 until then.
/// Records are never mutated in place; updates copy the record, overwrite
/// the attribute fields, and write the full copy back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    #[serde(rename = "user_email")]
    pub email: String,
    #[serde(rename = "user_fullname")]
    pub fullname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build an unsaved account. The store assigns the id and the
    /// authoritative timestamps on insert.
    pub fn new(email: impl Into<String>, fullname: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            account_id: 0,
            email: email.into(),
            fullname: fullname.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let account = Account::new("a@x.com", "A");
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["account_id"], 0);
        assert_eq!(json["user_email"], "a@x.com");
        assert_eq!(json["user_fullname"], "A");
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn round_trips_through_json() {
        let account = Account::new("a@x.com", "A");
        let bytes = serde_json::to_vec(&account).unwrap();
        let back: Account = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(account, back);
    }
}
