//! Public content handlers
//!
//! The site renderer reads sections through here. Reads never fail the page:
//! a datastore error still answers 200 with an empty payload and an `error`.

use axum::{
    extract::{Query, State},
    Json,
};
use safari_core::{ReadMode, RecordId, SectionKind};
use safari_service::{SectionRead, SectionResponse, SectionService};
use serde::Deserialize;
use tracing::error;

use crate::extractors::{AdminUser, ParsedPath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContentParams {
    /// `cms` for the editor view, anything else for the public view
    pub mode: Option<String>,
}

/// Read a section kind
///
/// GET /api/content/:kind?mode=
///
/// `mode=cms` is never downgraded to the public view: without an admin
/// identity it is a 401.
pub async fn get_section(
    State(state): State<AppState>,
    ParsedPath(kind): ParsedPath<SectionKind>,
    Query(params): Query<ContentParams>,
    admin: Result<AdminUser, ApiError>,
) -> ApiResult<Json<SectionRead>> {
    let mode = ReadMode::from_param(params.mode.as_deref());
    if mode.is_cms() {
        admin?;
    }

    let service = SectionService::new(state.service_context());
    let read = match service.fetch_section(kind, mode).await {
        Ok(read) => read,
        Err(e) => {
            error!(error = %e, kind = %kind, "Section read failed");
            SectionRead::failed(kind, mode, format!("Failed to load {}", kind.response_key()))
        }
    };

    Ok(Json(read))
}

/// One publicly visible row
///
/// GET /api/content/:kind/:id
pub async fn get_published(
    State(state): State<AppState>,
    ParsedPath((kind, id)): ParsedPath<(SectionKind, RecordId)>,
) -> ApiResult<Json<SectionResponse>> {
    let service = SectionService::new(state.service_context());
    let section = service.get_public(kind, id).await?;
    Ok(Json(section))
}
