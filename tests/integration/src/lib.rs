//! Integration test utilities for the safari site API
//!
//! Spawns the real server against the Postgres named by `DATABASE_URL` and
//! talks to it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
