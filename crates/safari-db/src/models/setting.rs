//! Site setting database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for site_settings table
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingModel {
    pub id: i64,
    pub key: String,
    pub category: String,
    pub value: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert result row; `inserted` is derived from `xmax = 0`
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedSettingModel {
    #[sqlx(flatten)]
    pub setting: SiteSettingModel,
    pub inserted: bool,
}
