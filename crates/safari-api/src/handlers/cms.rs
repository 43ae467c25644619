//! CMS session, activity feed and deploy handlers

use axum::{
    extract::{Query, State},
    Json,
};
use safari_common::Identity;
use safari_service::{AuditLogResponse, AuditRecorder, RebuildOutcome};
use serde::Deserialize;
use tracing::info;

use crate::extractors::AdminUser;
use crate::response::ApiResult;
use crate::state::AppState;

const DEFAULT_FEED_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct AuditParams {
    pub limit: Option<i64>,
}

/// The resolved admin identity
///
/// GET /api/cms/me
pub async fn current_identity(AdminUser(identity): AdminUser) -> Json<Identity> {
    Json(identity)
}

/// Recent audit entries, newest first
///
/// GET /api/cms/audit?limit=
pub async fn recent_activity(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<AuditParams>,
) -> ApiResult<Json<Vec<AuditLogResponse>>> {
    let entries = AuditRecorder::new(state.service_context())
        .recent(params.limit.unwrap_or(DEFAULT_FEED_LIMIT))
        .await?;
    Ok(Json(entries))
}

/// Fire the deploy hook and wait for its answer
///
/// POST /api/cms/rebuild
pub async fn trigger_rebuild(
    State(state): State<AppState>,
    AdminUser(identity): AdminUser,
) -> Json<RebuildOutcome> {
    info!(user_id = %identity.user_id, "Manual rebuild requested");
    Json(state.service_context().rebuild().trigger().await)
}
