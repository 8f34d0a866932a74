use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local account record. Every syncable record belongs to exactly one
/// account; sync passes run per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: String, display_name: String) -> Self {
        Self {
            id,
            display_name,
            created_at: Utc::now(),
        }
    }
}
