//! # safari-cache
//!
//! Redis layer for on-demand page revalidation.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Revalidation messages telling the site renderer which pages went stale
//!
//! ## Example
//!
//! ```ignore
//! use safari_cache::{Publisher, RedisPool, RedisPoolConfig, RevalidationEvent};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//!
//! let event = RevalidationEvent::new(SectionKind::Hero, "publish");
//! publisher.publish_revalidation(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher, RevalidationEvent, REVALIDATE_CHANNEL};
