//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AdminUser;
pub use pagination::{Pagination, PaginationParams};
pub use path::ParsedPath;
pub use validated::ValidatedJson;
