//! Image registry handlers
//!
//! Only metadata lives here; the bytes are uploaded straight to object storage.

use axum::{
    extract::{Query, State},
    Json,
};
use safari_service::{
    DeleteRequest, DeletedResponse, ImageResponse, ImageService, RegisterImageRequest,
    ServiceError,
};
use serde::Deserialize;

use crate::extractors::{AdminUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

const DEFAULT_IMAGE_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    pub folder: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/cms/images?folder=&limit=
pub async fn list_images(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<ImageParams>,
) -> ApiResult<Json<Vec<ImageResponse>>> {
    let service = ImageService::new(state.service_context());
    let images = service
        .list(params.folder.as_deref(), params.limit.unwrap_or(DEFAULT_IMAGE_LIMIT))
        .await?;
    Ok(Json(images))
}

/// POST /api/cms/images
pub async fn register_image(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<RegisterImageRequest>,
) -> ApiResult<Created<Json<ImageResponse>>> {
    let service = ImageService::new(state.service_context());
    let image = service.register(request, &admin.actor()).await?;
    Ok(Created(Json(image)))
}

/// DELETE /api/cms/images with body `{ id }`
pub async fn delete_image(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<DeleteRequest>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = request
        .id
        .ok_or_else(|| ServiceError::validation("id is required"))?;

    let service = ImageService::new(state.service_context());
    let deleted = service.delete(id, &admin.actor()).await?;
    Ok(Json(deleted))
}
