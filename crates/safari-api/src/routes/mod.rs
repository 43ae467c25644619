//! Route definitions
//!
//! Public reads and booking submissions live under `/api`; everything the
//! CMS edits lives under `/api/cms` behind the admin gate.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{bookings, cms, content, health, images, sections, settings};
use crate::middleware::cms_gate;
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api", api_routes(state))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .nest("/cms", cms_routes(state))
}

/// Routes the public site calls without credentials
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/content/:kind", get(content::get_section))
        .route("/content/:kind/:id", get(content::get_published))
        .route("/settings", get(settings::list_settings))
        .route("/settings/:key", get(settings::get_setting))
        .route("/bookings", post(bookings::submit_booking))
}

/// Admin-only routes; the gate rejects non-admins before any handler runs
fn cms_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/sections/:kind",
            post(sections::create_section)
                .patch(sections::update_section)
                .delete(sections::delete_section),
        )
        .route("/sections/:kind/reorder", put(sections::reorder_sections))
        .route("/settings", patch(settings::upsert_setting))
        .route("/bookings", get(bookings::list_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking)
                .patch(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route(
            "/images",
            get(images::list_images)
                .post(images::register_image)
                .delete(images::delete_image),
        )
        .route("/audit", get(cms::recent_activity))
        .route("/rebuild", post(cms::trigger_rebuild))
        .route("/me", get(cms::current_identity))
        .route_layer(from_fn_with_state(state.clone(), cms_gate))
}
