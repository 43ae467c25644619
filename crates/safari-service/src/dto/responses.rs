//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use safari_core::{
    AuditAction, BookingStatus, PublishStatus, ReadMode, RecordId, RequestType, SectionKind,
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-numbered list response
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Acknowledges a hard delete
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub id: RecordId,
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn new(id: RecordId) -> Self {
        Self { id, deleted: true }
    }
}

// ============================================================================
// Section Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: RecordId,
    pub kind: SectionKind,
    pub status: PublishStatus,
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

/// Payload of a section read: one row (or nothing) or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    One(Option<SectionResponse>),
    Many(Vec<SectionResponse>),
}

/// Result of `fetch_section`, serialized as `{ <responseKey>: data, error? }`
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRead {
    pub kind: SectionKind,
    pub data: SectionData,
    /// Set when the read failed and `data` is the empty fallback
    pub error: Option<String>,
}

impl SectionRead {
    /// Public single-row kinds yield one row; every other read yields a list
    pub fn shape(kind: SectionKind, mode: ReadMode, mut rows: Vec<SectionResponse>) -> Self {
        let data = if kind.is_single() && !mode.is_cms() {
            SectionData::One(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
        } else {
            SectionData::Many(rows)
        };
        Self {
            kind,
            data,
            error: None,
        }
    }

    /// Empty payload carrying an error message
    pub fn failed(kind: SectionKind, mode: ReadMode, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::shape(kind, mode, Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            SectionData::One(row) => usize::from(row.is_some()),
            SectionData::Many(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for SectionRead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.kind.response_key(), &self.data)?;
        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderResponse {
    pub kind: SectionKind,
    pub updated: usize,
}

// ============================================================================
// Audit Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: RecordId,
    pub action: AuditAction,
    pub entity_type: String,
    /// Record id, or `"multiple"` for batch operations
    pub entity_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Setting Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingResponse {
    pub id: RecordId,
    pub key: String,
    pub category: String,
    pub value: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpsertSettingResponse {
    #[serde(flatten)]
    pub setting: SettingResponse,
    /// True when the upsert inserted a new row
    pub created: bool,
}

// ============================================================================
// Booking Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: RecordId,
    pub confirmation_number: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub package_ref: Option<String>,
    pub destination_ref: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub travelers: i32,
    pub message: Option<String>,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a visitor sees after submitting a booking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub id: RecordId,
    pub confirmation_number: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Image Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: RecordId,
    pub storage_key: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub folder: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is not configured
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: match redis_healthy {
                    Some(true) => "healthy",
                    Some(false) => "unhealthy",
                    None => "disabled",
                }
                .to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: i64, kind: SectionKind) -> SectionResponse {
        let now = Utc::now();
        SectionResponse {
            id: RecordId::new(id),
            kind,
            status: PublishStatus::Published,
            title: Some("Serengeti".to_string()),
            subtitle: None,
            description: None,
            image: None,
            images: Vec::new(),
            link_label: None,
            link_url: None,
            items: json!([]),
            metadata: json!({}),
            display_order: 0,
            active: true,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_single_kind_is_object_or_null() {
        let read = SectionRead::shape(SectionKind::Hero, ReadMode::Public, vec![row(7, SectionKind::Hero)]);
        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["hero"]["id"], "7");
        assert_eq!(json["hero"]["status"], "PUBLISHED");
        assert!(json.get("error").is_none());

        let empty = SectionRead::shape(SectionKind::ContactInfo, ReadMode::Public, Vec::new());
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({ "contactInfo": null }));
    }

    #[test]
    fn test_cms_single_kind_is_list() {
        let read = SectionRead::shape(
            SectionKind::Hero,
            ReadMode::Cms,
            vec![row(1, SectionKind::Hero), row(2, SectionKind::Hero)],
        );
        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["hero"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_read_carries_error() {
        let read = SectionRead::failed(SectionKind::Faq, ReadMode::Public, "Failed to load faqs");
        assert!(read.is_empty());
        assert_eq!(
            serde_json::to_value(&read).unwrap(),
            json!({ "faqs": [], "error": "Failed to load faqs" })
        );
    }

    #[test]
    fn test_paginated_total_pages() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 1, 20, 41);
        assert_eq!(response.pagination.total_pages, 3);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 3);

        let empty: PaginatedResponse<i32> = PaginatedResponse::new(Vec::new(), 1, 20, 0);
        assert_eq!(empty.pagination.total_pages, 0);
    }

    #[test]
    fn test_readiness_without_redis() {
        let response = ReadinessResponse::ready(true, None);
        assert!(response.is_ready());
        assert_eq!(response.checks.redis, "disabled");

        let response = ReadinessResponse::ready(true, Some(false));
        assert!(!response.is_ready());
        assert_eq!(response.checks.redis, "unhealthy");
    }

    #[test]
    fn test_upsert_response_flattens_setting() {
        let now = Utc::now();
        let response = UpsertSettingResponse {
            setting: SettingResponse {
                id: RecordId::new(3),
                key: "meta".to_string(),
                category: "seo".to_string(),
                value: json!({ "title": "Safaris" }),
                created_at: now,
                updated_at: now,
            },
            created: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["key"], "meta");
        assert_eq!(json["created"], true);
    }
}
