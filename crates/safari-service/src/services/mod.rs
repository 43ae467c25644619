//! Business logic services
//!
//! This module contains the content publish workflow and the services
//! around it: audit recording, rebuild triggering, settings, bookings and
//! the image registry.

pub mod audit;
pub mod booking;
pub mod context;
pub mod error;
pub mod image;
pub mod rebuild;
pub mod revalidate;
pub mod section;
pub mod setting;

// Re-export all services for convenience
pub use audit::AuditRecorder;
pub use booking::BookingService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use image::ImageService;
pub use rebuild::{DetachedRebuild, RebuildError, RebuildOutcome, RebuildTrigger};
pub use revalidate::Revalidator;
pub use section::{Mutation, SectionService};
pub use setting::SettingService;
