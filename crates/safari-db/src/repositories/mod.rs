//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in safari-core.
//! Each repository handles database operations for a specific domain entity.

mod audit_log;
mod booking;
mod error;
mod image;
mod section;
mod setting;

pub use audit_log::PgAuditLogRepository;
pub use booking::PgBookingRepository;
pub use image::PgImageRepository;
pub use section::PgSectionRepository;
pub use setting::PgSettingRepository;
