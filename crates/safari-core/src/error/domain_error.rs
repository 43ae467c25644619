//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Section not found: {0}")]
    SectionNotFound(RecordId),

    #[error("Booking not found: {0}")]
    BookingNotFound(RecordId),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(RecordId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown section kind: {0}")]
    InvalidSectionKind(String),

    #[error("Reorder payload must not be empty")]
    EmptyReorder,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Confirmation number already exists")]
    ConfirmationNumberExists,

    #[error("Image key already registered: {0}")]
    ImageKeyExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::SectionNotFound(_) => "UNKNOWN_SECTION",
            Self::BookingNotFound(_) => "UNKNOWN_BOOKING",
            Self::SettingNotFound(_) => "UNKNOWN_SETTING",
            Self::ImageNotFound(_) => "UNKNOWN_IMAGE",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidSectionKind(_) => "INVALID_SECTION_KIND",
            Self::EmptyReorder => "EMPTY_REORDER",

            Self::ConfirmationNumberExists => "CONFIRMATION_NUMBER_EXISTS",
            Self::ImageKeyExists(_) => "IMAGE_KEY_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SectionNotFound(_)
                | Self::BookingNotFound(_)
                | Self::SettingNotFound(_)
                | Self::ImageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidSectionKind(_) | Self::EmptyReorder
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConfirmationNumberExists | Self::ImageKeyExists(_))
    }
}
