//! Content section database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for content_sections table
#[derive(Debug, Clone, FromRow)]
pub struct ContentSectionModel {
    pub id: i64,
    pub kind: String,
    /// 'DRAFT' or 'PUBLISHED'
    pub status: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub link_label: Option<String>,
    pub link_url: Option<String>,
    pub items: JsonValue,
    pub metadata: JsonValue,
    pub display_order: i32,
    pub active: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
