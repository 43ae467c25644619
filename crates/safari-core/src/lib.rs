//! # safari-core
//!
//! Domain layer for the safari site: editable content sections and their
//! draft/published lifecycle, bookings and quote requests, site settings,
//! image assets and the append-only audit log.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_confirmation_number, Actor, AuditAction, AuditLogEntry, AuditTarget, Booking,
    BookingQuery, BookingStatus, Cardinality, ContentSection, ImageAsset, PublishStatus,
    ReadMode, RequestType, SectionKind, SectionOrder, SectionPatch, SectionQuery, SiteSetting,
    UpsertOutcome, CONFIRMATION_PREFIX, DEFAULT_SETTING_CATEGORY,
};
pub use error::DomainError;
pub use traits::{
    AuditLogRepository, BookingPage, BookingRepository, ImageRepository, RepoResult,
    SectionRepository, SettingRepository,
};
pub use value_objects::{IdGenerator, RecordId, RecordIdParseError};
