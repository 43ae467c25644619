//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod booking;
mod image;
mod section;
mod setting;

pub use audit_log::AuditLogModel;
pub use booking::BookingModel;
pub use image::ImageAssetModel;
pub use section::ContentSectionModel;
pub use setting::{SiteSettingModel, UpsertedSettingModel};
