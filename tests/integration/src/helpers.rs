//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use safari_api::{create_app, create_app_state};
use safari_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, DeployConfig, Environment, IdentityConfig,
    IdentityVerifier, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Signing secret shared by the test server and the tokens it is sent
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    verifier: IdentityVerifier,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let verifier = IdentityVerifier::new(&config.identity);

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Port 0 lets the OS pick a free port per server
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            verifier,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Token carrying the configured admin role
    pub fn admin_token(&self) -> Result<String> {
        Ok(self
            .verifier
            .issue("it_admin", Some("Integration Admin"), Some("admin"), &[], 600)?)
    }

    /// Valid token without admin rights
    pub fn visitor_token(&self) -> Result<String> {
        Ok(self
            .verifier
            .issue("it_visitor", Some("Visitor"), Some("member"), &[], 600)?)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url(), path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    /// Send a JSON body with an optional auth token
    pub async fn send_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        Ok(self.request(method, path, token).json(body).send().await?)
    }
}

/// Configuration for a test server
///
/// Only `DATABASE_URL` is read from the environment; Redis is used when
/// `REDIS_URL` is set. No deploy hook is configured.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let redis = std::env::var("REDIS_URL").ok().map(|url| RedisConfig {
        url,
        max_connections: 4,
    });

    Ok(AppConfig {
        app: AppSettings {
            name: "safari-site-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        redis,
        identity: IdentityConfig {
            secret: TEST_SECRET.to_string(),
            admin_role: "admin".to_string(),
            admin_groups: Vec::new(),
        },
        deploy: DeployConfig {
            rebuild_hook_url: None,
            timeout_secs: 2,
        },
        storage: StorageConfig {
            bucket: "safari-images-test".to_string(),
            public_base_url: "https://images.example.test".to_string(),
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 7 },
    })
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
