//! # safari-common
//!
//! Shared utilities including configuration, error handling, identity verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, Identity, IdentityVerifier};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, DeployConfig, Environment,
    IdentityConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
pub use error::AppError;
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
