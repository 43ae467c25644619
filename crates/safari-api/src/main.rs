//! Safari site API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p safari-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use safari_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so it is loaded before tracing
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        redis = config.redis.is_some(),
        rebuild_hook = config.deploy.rebuild_hook_url.is_some(),
        "Configuration loaded"
    );

    if let Err(e) = safari_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
