//! Test fixtures and data generators
//!
//! Provides reusable request bodies for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Section create body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    pub publish: bool,
}

impl NewSection {
    pub fn draft(prefix: &str) -> Self {
        Self {
            title: format!("{prefix} {}", unique_suffix()),
            display_order: None,
            publish: false,
        }
    }

    pub fn published(prefix: &str) -> Self {
        Self {
            publish: true,
            ..Self::draft(prefix)
        }
    }
}

/// The fields of a section response the tests look at
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBody {
    pub id: String,
    pub title: Option<String>,
    pub status: String,
    pub display_order: i32,
    pub active: bool,
    pub published_at: Option<String>,
}

/// Booking submission body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(rename = "type")]
    pub request_type: String,
    pub full_name: String,
    pub email: String,
    pub travelers: i32,
}

impl NewBooking {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            request_type: "booking".to_string(),
            full_name: format!("Traveler {suffix}"),
            email: format!("traveler{suffix}@example.com"),
            travelers: 2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBody {
    pub id: String,
    pub confirmation_number: String,
    pub status: String,
}
