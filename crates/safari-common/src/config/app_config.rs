//! Application configuration structs
//!
//! Built once at startup from environment variables and passed down by
//! reference; nothing below `main` reads the environment.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// Absent when page revalidation messages are not wanted
    pub redis: Option<RedisConfig>,
    pub identity: IdentityConfig,
    pub deploy: DeployConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Identity provider token settings
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Shared HS256 secret used by the identity provider to sign tokens
    pub secret: String,
    /// Value of the `role` claim that grants CMS access
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Membership in any of these groups also grants CMS access
    #[serde(default)]
    pub admin_groups: Vec<String>,
}

/// Static-site rebuild webhook settings
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    pub rebuild_hook_url: Option<String>,
    #[serde(default = "default_deploy_timeout")]
    pub timeout_secs: u64,
}

impl DeployConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Object storage for uploaded images
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Base URL under which bucket objects are publicly served
    pub public_base_url: String,
}

/// Record id generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "safari-site".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_admin_role() -> String {
    "admin".to_string()
}

fn default_deploy_timeout() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_bucket() -> String {
    "safari-images".to_string()
}

fn parsed<T: std::str::FromStr>(var: &str) -> Option<T> {
    env::var(var).ok().and_then(|s| s.parse().ok())
}

/// Unset and blank both count as absent
fn non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn list(var: &str) -> Vec<String> {
    env::var(var)
        .ok()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parsed("API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
            },
            redis: non_empty("REDIS_URL").map(|url| RedisConfig {
                url,
                max_connections: parsed("REDIS_MAX_CONNECTIONS")
                    .unwrap_or_else(default_redis_max_connections),
            }),
            identity: IdentityConfig {
                secret: env::var("IDENTITY_JWT_SECRET")
                    .map_err(|_| ConfigError::MissingVar("IDENTITY_JWT_SECRET"))?,
                admin_role: env::var("IDENTITY_ADMIN_ROLE")
                    .unwrap_or_else(|_| default_admin_role()),
                admin_groups: list("IDENTITY_ADMIN_GROUPS"),
            },
            deploy: DeployConfig {
                rebuild_hook_url: non_empty("DEPLOY_HOOK_URL"),
                timeout_secs: parsed("DEPLOY_HOOK_TIMEOUT_SECS")
                    .unwrap_or_else(default_deploy_timeout),
            },
            storage: StorageConfig {
                bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| default_bucket()),
                public_base_url: env::var("STORAGE_PUBLIC_URL")
                    .map_err(|_| ConfigError::MissingVar("STORAGE_PUBLIC_URL"))?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parsed("RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: list("CORS_ALLOWED_ORIGINS"),
            },
            snowflake: SnowflakeConfig {
                worker_id: match parsed::<u16>("WORKER_ID") {
                    Some(id) if id >= 1024 => {
                        return Err(ConfigError::InvalidValue("WORKER_ID", id.to_string()))
                    }
                    Some(id) => id,
                    None => 0,
                },
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse("staging"), Some(Environment::Staging));
        assert_eq!(Environment::parse("qa"), None);
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_deploy_timeout() {
        let deploy = DeployConfig {
            rebuild_hook_url: None,
            timeout_secs: default_deploy_timeout(),
        };
        assert_eq!(deploy.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "safari-site");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_max_connections(), 20);
        assert_eq!(default_admin_role(), "admin");
    }
}
