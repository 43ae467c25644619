//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use safari_core::{BookingQuery, BookingStatus, RecordId, RequestType, SectionPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use validator::{Validate, ValidationError};

// ============================================================================
// Section Requests
// ============================================================================

/// Editable fields shared by every section kind; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectionFields {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 300, message = "Subtitle must be at most 300 characters"))]
    pub subtitle: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 2048))]
    pub image: Option<String>,

    #[validate(length(max = 50, message = "At most 50 images per section"))]
    pub images: Option<Vec<String>>,

    #[validate(length(max = 100))]
    pub link_label: Option<String>,

    #[validate(length(max = 2048))]
    pub link_url: Option<String>,

    /// Ordered sub-items
    #[validate(custom(function = "json_array"))]
    pub items: Option<JsonValue>,

    #[validate(custom(function = "json_object"))]
    pub metadata: Option<JsonValue>,

    #[validate(range(min = -100_000, max = 100_000, message = "displayOrder must be between -100000 and 100000"))]
    pub display_order: Option<i32>,

    pub active: Option<bool>,
}

impl SectionFields {
    pub fn into_patch(self) -> SectionPatch {
        SectionPatch {
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            image: self.image,
            images: self.images,
            link_label: self.link_label,
            link_url: self.link_url,
            items: self.items,
            metadata: self.metadata,
            display_order: self.display_order,
            active: self.active,
        }
    }
}

fn json_array(value: &JsonValue) -> Result<(), ValidationError> {
    if value.is_array() {
        Ok(())
    } else {
        Err(ValidationError::new("items_not_array"))
    }
}

fn json_object(value: &JsonValue) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("metadata_not_object"))
    }
}

/// Create a section row
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: SectionFields,

    /// Publish immediately instead of saving a draft
    #[serde(default)]
    pub publish: bool,
}

/// Update a section row; `publish = false` reverts it to a draft
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(required(message = "id is required"))]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub publish: bool,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: SectionFields,
}

/// Delete a row by id, sent as `{ id }`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteRequest {
    #[validate(required(message = "id is required"))]
    pub id: Option<RecordId>,
}

/// One entry of a reorder batch
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SlideOrder {
    pub id: RecordId,

    #[validate(range(min = -100_000, max = 100_000, message = "displayOrder must be between -100000 and 100000"))]
    pub display_order: i32,
}

/// Reorder a multi-row kind in one batch
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "unique_slide_ids"))]
pub struct ReorderRequest {
    #[validate(
        length(min = 1, max = 500, message = "slides must contain 1-500 entries"),
        nested
    )]
    pub slides: Vec<SlideOrder>,
}

impl ReorderRequest {
    pub fn orders(&self) -> Vec<(RecordId, i32)> {
        self.slides.iter().map(|s| (s.id, s.display_order)).collect()
    }
}

fn unique_slide_ids(request: &ReorderRequest) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(request.slides.len());
    if request.slides.iter().all(|s| seen.insert(s.id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_id"))
    }
}

// ============================================================================
// Setting Requests
// ============================================================================

/// Insert or replace a setting by key
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSettingRequest {
    #[validate(length(min = 1, max = 100, message = "key must be 1-100 characters"))]
    pub key: String,

    #[validate(length(min = 1, max = 50, message = "category must be 1-50 characters"))]
    pub category: Option<String>,

    pub value: JsonValue,
}

// ============================================================================
// Booking Requests
// ============================================================================

fn default_travelers() -> i32 {
    1
}

/// Public booking or quote submission
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default, rename = "type")]
    pub request_type: RequestType,

    #[validate(length(min = 1, max = 200, message = "Full name must be 1-200 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[validate(length(max = 100))]
    pub country: Option<String>,

    #[validate(length(max = 200))]
    pub package_ref: Option<String>,

    #[validate(length(max = 200))]
    pub destination_ref: Option<String>,

    pub travel_date: Option<NaiveDate>,

    #[serde(default = "default_travelers")]
    #[validate(range(min = 1, max = 50, message = "travelers must be 1-50"))]
    pub travelers: i32,

    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    pub message: Option<String>,
}

/// Admin changes to a booking
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,

    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,

    pub travel_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 50, message = "travelers must be 1-50"))]
    pub travelers: Option<i32>,
}

/// Filters of the admin booking list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    #[serde(rename = "type")]
    pub request_type: Option<RequestType>,
}

impl BookingFilter {
    pub fn into_query(self, page: i64, limit: i64) -> BookingQuery {
        BookingQuery {
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: self.status,
            request_type: self.request_type,
            page,
            limit,
        }
    }
}

// ============================================================================
// Image Requests
// ============================================================================

/// Register an uploaded object in the image registry
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterImageRequest {
    #[validate(length(min = 1, max = 512, message = "storageKey must be 1-512 characters"))]
    pub storage_key: String,

    #[validate(length(max = 300))]
    pub alt_text: Option<String>,

    #[validate(length(max = 100))]
    pub folder: Option<String>,

    #[validate(range(min = 1, max = 20_000))]
    pub width: Option<i32>,

    #[validate(range(min = 1, max = 20_000))]
    pub height: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_requires_id() {
        let request: UpdateSectionRequest =
            serde_json::from_value(json!({ "title": "Migration season", "publish": true })).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("id"));
    }

    #[test]
    fn test_update_flattens_fields() {
        let request: UpdateSectionRequest = serde_json::from_value(json!({
            "id": "42",
            "publish": true,
            "linkUrl": "/tours",
            "displayOrder": 3
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.id, Some(RecordId::new(42)));
        assert!(request.publish);
        assert_eq!(request.fields.link_url.as_deref(), Some("/tours"));
        assert_eq!(request.fields.display_order, Some(3));
    }

    #[test]
    fn test_publish_defaults_to_false() {
        let request: CreateSectionRequest =
            serde_json::from_value(json!({ "title": "Gorilla Trek", "images": ["a.webp"] })).unwrap();
        assert!(!request.publish);
        let patch = request.fields.into_patch();
        assert_eq!(patch.display_order, None);
        assert_eq!(patch.images, Some(vec!["a.webp".to_string()]));
    }

    #[test]
    fn test_items_must_be_array() {
        let request: CreateSectionRequest =
            serde_json::from_value(json!({ "items": { "q": "?" } })).unwrap();
        assert!(request.validate().is_err());

        let request: CreateSectionRequest =
            serde_json::from_value(json!({ "items": [{ "q": "?" }] })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reorder_validation() {
        let empty: ReorderRequest = serde_json::from_value(json!({ "slides": [] })).unwrap();
        assert!(empty.validate().is_err());

        let out_of_range: ReorderRequest =
            serde_json::from_value(json!({ "slides": [{ "id": "1", "displayOrder": 100_001 }] }))
                .unwrap();
        assert!(out_of_range.validate().is_err());

        let duplicate: ReorderRequest = serde_json::from_value(json!({
            "slides": [{ "id": "1", "displayOrder": 0 }, { "id": "1", "displayOrder": 1 }]
        }))
        .unwrap();
        let errors = duplicate.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));

        let ok: ReorderRequest = serde_json::from_value(json!({
            "slides": [{ "id": "1", "displayOrder": 1 }, { "id": "2", "displayOrder": 0 }]
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(
            ok.orders(),
            vec![(RecordId::new(1), 1), (RecordId::new(2), 0)]
        );
    }

    #[test]
    fn test_display_order_may_be_negative() {
        let reorder: ReorderRequest = serde_json::from_value(json!({
            "slides": [{ "id": "1", "displayOrder": -5 }, { "id": "2", "displayOrder": 0 }]
        }))
        .unwrap();
        assert!(reorder.validate().is_ok());

        let create: CreateSectionRequest =
            serde_json::from_value(json!({ "title": "Pinned", "displayOrder": -1 })).unwrap();
        assert!(create.validate().is_ok());
        assert_eq!(create.fields.into_patch().display_order, Some(-1));
    }

    #[test]
    fn test_reorder_rejects_missing_display_order() {
        let result = serde_json::from_value::<ReorderRequest>(json!({ "slides": [{ "id": "1" }] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_booking_defaults() {
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "fullName": "Zawadi Otieno",
            "email": "zawadi@example.com"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.request_type, RequestType::Booking);
        assert_eq!(request.travelers, 1);
    }

    #[test]
    fn test_booking_rejects_bad_email() {
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "type": "quote",
            "fullName": "Zawadi Otieno",
            "email": "not-an-email"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_filter_blank_search_is_ignored() {
        let filter = BookingFilter {
            search: Some("   ".to_string()),
            ..BookingFilter::default()
        };
        let query = filter.into_query(2, 10);
        assert_eq!(query.search, None);
        assert_eq!(query.page, 2);
    }
}
