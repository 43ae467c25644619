//! Redis Pub/Sub module.
//!
//! Publishes page revalidation messages consumed by the site renderer.

mod channels;
mod publisher;

pub use channels::{PubSubChannel, REVALIDATE_CHANNEL};
pub use publisher::{PubSubEvent, Publisher, RevalidationEvent};
