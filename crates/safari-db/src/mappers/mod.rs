//! Entity to model mappers
//!
//! Conversions between domain entities (safari-core) and database models.
//! - `From<Model> for Entity` / `TryFrom` where a text column must parse

mod audit_log;
mod booking;
mod image;
mod section;
mod setting;

pub use section::sections_from_models;
