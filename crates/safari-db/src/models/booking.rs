//! Booking database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for bookings table
#[derive(Debug, Clone, FromRow)]
pub struct BookingModel {
    pub id: i64,
    pub confirmation_number: String,
    pub request_type: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub package_ref: Option<String>,
    pub destination_ref: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub travelers: i32,
    pub message: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
