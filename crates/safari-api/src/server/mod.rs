//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use safari_cache::RedisPool;
use safari_common::{AppConfig, AppError};
use safari_core::IdGenerator;
use safari_db::{
    create_pool, run_migrations, PgAuditLogRepository, PgBookingRepository, PgImageRepository,
    PgSectionRepository, PgSettingRepository,
};
use safari_service::{RebuildTrigger, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    // Probes are merged after the rate limiter so they are never throttled
    Ok(router.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&safari_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    let mut builder = ServiceContextBuilder::new()
        .pool(pool.clone())
        .section_repo(Arc::new(PgSectionRepository::new(pool.clone())))
        .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .setting_repo(Arc::new(PgSettingRepository::new(pool.clone())))
        .booking_repo(Arc::new(PgBookingRepository::new(pool.clone())))
        .image_repo(Arc::new(PgImageRepository::new(pool)))
        .storage(config.storage.clone())
        .id_generator(Arc::new(IdGenerator::new(config.snowflake.worker_id)));

    match &config.redis {
        Some(redis_config) => {
            let redis_pool =
                RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            builder = builder.redis_pool(redis_pool);
            info!("Redis pool created, page revalidation enabled");
        }
        None => warn!("REDIS_URL not set, page revalidation disabled"),
    }

    let rebuild =
        RebuildTrigger::new(&config.deploy).map_err(|e| AppError::Config(e.to_string()))?;
    if !rebuild.is_configured() {
        warn!("DEPLOY_HOOK_URL not set, publishing will not trigger a rebuild");
    }

    let service_context = builder
        .rebuild(rebuild)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {}", e)))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
