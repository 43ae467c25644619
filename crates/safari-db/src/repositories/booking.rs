//! PostgreSQL implementation of BookingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use safari_core::entities::{Booking, BookingQuery};
use safari_core::error::DomainError;
use safari_core::traits::{BookingPage, BookingRepository, RepoResult};
use safari_core::value_objects::RecordId;

use crate::models::BookingModel;

use super::error::{booking_not_found, like_pattern, map_db_error, map_unique_violation};

const BOOKING_COLUMNS: &str = "id, confirmation_number, request_type, full_name, email, phone, \
     country, package_ref, destination_ref, travel_date, travelers, message, status, \
     admin_notes, created_at, updated_at";

/// Shared by the page and count statements; binds $1..$3
const SEARCH_FILTER: &str = r#"
    ($1::text IS NULL
        OR full_name ILIKE $1
        OR email ILIKE $1
        OR confirmation_number ILIKE $1)
    AND ($2::text IS NULL OR status = $2)
    AND ($3::text IS NULL OR request_type = $3)
"#;

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let result = sqlx::query_as::<_, BookingModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Booking::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &BookingQuery) -> RepoResult<BookingPage> {
        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        let status = query.status.map(|s| s.as_str());
        let request_type = query.request_type.map(|t| t.as_str());

        let count_sql = format!("SELECT COUNT(*) FROM bookings WHERE {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(status)
            .bind(request_type)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let page_sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE {SEARCH_FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, BookingModel>(&page_sql)
            .bind(&pattern)
            .bind(status)
            .bind(request_type)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(BookingPage {
            items: items.into_iter().map(Booking::from).collect(),
            total,
        })
    }

    #[instrument(skip(self, booking), fields(confirmation = %booking.confirmation_number))]
    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, confirmation_number, request_type, full_name, email, phone,
                                  country, package_ref, destination_ref, travel_date, travelers,
                                  message, status, admin_notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(booking.id.into_inner())
        .bind(&booking.confirmation_number)
        .bind(booking.request_type.as_str())
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.country)
        .bind(&booking.package_ref)
        .bind(&booking.destination_ref)
        .bind(booking.travel_date)
        .bind(booking.travelers)
        .bind(&booking.message)
        .bind(booking.status.as_str())
        .bind(&booking.admin_notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConfirmationNumberExists))?;

        Ok(())
    }

    #[instrument(skip(self, booking), fields(id = %booking.id))]
    async fn update(&self, booking: &Booking) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, admin_notes = $3, travel_date = $4, travelers = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(booking.id.into_inner())
        .bind(booking.status.as_str())
        .bind(&booking.admin_notes)
        .bind(booking.travel_date)
        .bind(booking.travelers)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(booking_not_found(booking.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
