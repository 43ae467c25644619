//! Site settings - JSON values keyed by a unique string key

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::value_objects::RecordId;

/// Category assigned when a setting is created without one
pub const DEFAULT_SETTING_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSetting {
    pub id: RecordId,
    pub key: String,
    pub category: String,
    pub value: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteSetting {
    pub fn new(id: RecordId, key: String, category: String, value: JsonValue) -> Self {
        let now = Utc::now();
        Self {
            id,
            key,
            category,
            value,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which branch an upsert took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }
}
