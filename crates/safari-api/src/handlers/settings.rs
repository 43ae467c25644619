//! Site setting handlers

use axum::{
    extract::{Query, State},
    Json,
};
use safari_service::{SettingResponse, SettingService, UpsertSettingRequest, UpsertSettingResponse};
use serde::Deserialize;

use crate::extractors::{AdminUser, ParsedPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SettingParams {
    pub category: Option<String>,
}

/// GET /api/settings?category=
pub async fn list_settings(
    State(state): State<AppState>,
    Query(params): Query<SettingParams>,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    let service = SettingService::new(state.service_context());
    let settings = service.list(params.category.as_deref()).await?;
    Ok(Json(settings))
}

/// GET /api/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    ParsedPath(key): ParsedPath<String>,
) -> ApiResult<Json<SettingResponse>> {
    let service = SettingService::new(state.service_context());
    let setting = service.get(&key).await?;
    Ok(Json(setting))
}

/// Insert or replace a setting by key
///
/// PATCH /api/cms/settings
pub async fn upsert_setting(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<UpsertSettingRequest>,
) -> ApiResult<Json<UpsertSettingResponse>> {
    let service = SettingService::new(state.service_context());
    let response = service.upsert(request, &admin.actor()).await?;
    Ok(Json(response))
}
