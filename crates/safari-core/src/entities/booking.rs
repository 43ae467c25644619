//! Bookings and quote requests submitted by customers

use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Prefix of every confirmation number
pub const CONFIRMATION_PREFIX: &str = "SAF-";
const CONFIRMATION_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    #[default]
    Booking,
    Quote,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Quote => "quote",
        }
    }

    pub fn from_db(value: &str) -> Self {
        if value == "quote" {
            Self::Quote
        } else {
            Self::Booking
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: RecordId,
    pub confirmation_number: String,
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
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Search/filter/paginate parameters for the admin booking list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuery {
    /// Case-insensitive match on name, email or confirmation number
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub request_type: Option<RequestType>,
    /// 1-based
    pub page: i64,
    pub limit: i64,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            request_type: None,
            page: 1,
            limit: 20,
        }
    }
}

impl BookingQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit
    }
}

/// `SAF-` followed by eight uppercase alphanumerics
pub fn generate_confirmation_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CONFIRMATION_SUFFIX_LEN)
        .map(|c| char::from(c).to_ascii_uppercase())
        .collect();
    format!("{CONFIRMATION_PREFIX}{suffix}")
}
