//! Image asset database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for image_assets table
#[derive(Debug, Clone, FromRow)]
pub struct ImageAssetModel {
    pub id: i64,
    pub storage_key: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub folder: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}
