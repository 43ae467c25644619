//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, DeployConfig, Environment,
    IdentityConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
