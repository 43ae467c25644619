//! Domain entities - core business objects

mod audit;
mod booking;
mod image;
mod section;
mod setting;

pub use audit::{Actor, AuditAction, AuditLogEntry, AuditTarget};
pub use booking::{
    generate_confirmation_number, Booking, BookingQuery, BookingStatus, RequestType,
    CONFIRMATION_PREFIX,
};
pub use image::ImageAsset;
pub use section::{
    Cardinality, ContentSection, PublishStatus, ReadMode, SectionKind, SectionOrder,
    SectionPatch, SectionQuery,
};
pub use setting::{SiteSetting, UpsertOutcome, DEFAULT_SETTING_CATEGORY};
