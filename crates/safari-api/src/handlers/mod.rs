//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod bookings;
pub mod cms;
pub mod content;
pub mod health;
pub mod images;
pub mod sections;
pub mod settings;
