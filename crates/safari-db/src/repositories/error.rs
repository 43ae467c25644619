//! Error handling utilities for repositories

use safari_core::error::DomainError;
use safari_core::value_objects::RecordId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn section_not_found(id: RecordId) -> DomainError {
    DomainError::SectionNotFound(id)
}

pub fn booking_not_found(id: RecordId) -> DomainError {
    DomainError::BookingNotFound(id)
}

/// Escape LIKE wildcards in user input and wrap it for a substring match
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
