//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the identity verifier.

use std::sync::Arc;

use safari_common::{AppConfig, IdentityVerifier};
use safari_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    identity: Arc<IdentityVerifier>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let identity = IdentityVerifier::new(&config.identity);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            identity: Arc::new(identity),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verifier for identity provider tokens
    pub fn identity(&self) -> &IdentityVerifier {
        &self.identity
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .field("identity", &self.identity)
            .finish()
    }
}
