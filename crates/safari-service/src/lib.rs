//! # safari-service
//!
//! Application layer: the content publish workflow, its side effects
//! (audit entries, page revalidation, deploy hook) and the booking,
//! settings and image services, plus the request/response DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use dto::*;
pub use services::*;
