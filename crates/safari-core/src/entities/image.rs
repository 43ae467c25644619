//! Image assets - metadata for files held in external object storage

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: RecordId,
    /// Object key inside the configured bucket
    pub storage_key: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub folder: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

impl ImageAsset {
    /// Public URL for an object key under the storage base URL
    pub fn public_url(base_url: &str, storage_key: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            storage_key.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_once() {
        assert_eq!(
            ImageAsset::public_url("https://cdn.example.com/", "/gallery/a.webp"),
            "https://cdn.example.com/gallery/a.webp"
        );
        assert_eq!(
            ImageAsset::public_url("https://cdn.example.com", "b.webp"),
            "https://cdn.example.com/b.webp"
        );
    }
}
