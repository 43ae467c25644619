//! CMS section handlers

use axum::{extract::State, Json};
use safari_core::SectionKind;
use safari_service::{
    CreateSectionRequest, DeleteRequest, DeletedResponse, ReorderRequest, ReorderResponse,
    SectionResponse, SectionService, UpdateSectionRequest,
};

use crate::extractors::{AdminUser, ParsedPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a section row, as a draft unless `publish` is set
///
/// POST /api/cms/sections/:kind
pub async fn create_section(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(kind): ParsedPath<SectionKind>,
    ValidatedJson(request): ValidatedJson<CreateSectionRequest>,
) -> ApiResult<Created<Json<SectionResponse>>> {
    let service = SectionService::new(state.service_context());
    let section = service.create(kind, request, &admin.actor()).await?.into_record();
    Ok(Created(Json(section)))
}

/// Update fields and the publish flag of one row
///
/// PATCH /api/cms/sections/:kind
pub async fn update_section(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(kind): ParsedPath<SectionKind>,
    ValidatedJson(request): ValidatedJson<UpdateSectionRequest>,
) -> ApiResult<Json<SectionResponse>> {
    let service = SectionService::new(state.service_context());
    let section = service
        .update_section(kind, request, &admin.actor())
        .await?
        .into_record();
    Ok(Json(section))
}

/// Hard delete one row
///
/// DELETE /api/cms/sections/:kind
pub async fn delete_section(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(kind): ParsedPath<SectionKind>,
    ValidatedJson(request): ValidatedJson<DeleteRequest>,
) -> ApiResult<Json<DeletedResponse>> {
    let service = SectionService::new(state.service_context());
    let deleted = service.delete(kind, request, &admin.actor()).await?;
    Ok(Json(deleted))
}

/// Apply a display order batch atomically
///
/// PUT /api/cms/sections/:kind/reorder
pub async fn reorder_sections(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(kind): ParsedPath<SectionKind>,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> ApiResult<Json<ReorderResponse>> {
    let service = SectionService::new(state.service_context());
    let reordered = service.reorder(kind, request, &admin.actor()).await?;
    Ok(Json(reordered))
}
