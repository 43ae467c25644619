//! Booking handlers
//!
//! Visitors submit bookings and quote requests publicly; the CMS lists and
//! manages them.

use axum::{
    extract::{Query, State},
    Json,
};
use safari_core::RecordId;
use safari_service::{
    BookingFilter, BookingReceipt, BookingResponse, BookingService, CreateBookingRequest,
    DeletedResponse, PaginatedResponse, UpdateBookingRequest,
};

use crate::extractors::{AdminUser, Pagination, ParsedPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/bookings
pub async fn submit_booking(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<Created<Json<BookingReceipt>>> {
    let service = BookingService::new(state.service_context());
    let receipt = service.submit(request).await?;
    Ok(Created(Json(receipt)))
}

/// Search, filter and paginate bookings
///
/// GET /api/cms/bookings?search=&status=&type=&page=&limit=
pub async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
    pagination: Pagination,
    Query(filter): Query<BookingFilter>,
) -> ApiResult<Json<PaginatedResponse<BookingResponse>>> {
    let service = BookingService::new(state.service_context());
    let page = service
        .search(filter.into_query(pagination.page, pagination.limit))
        .await?;
    Ok(Json(page))
}

/// GET /api/cms/bookings/:id
pub async fn get_booking(
    State(state): State<AppState>,
    _admin: AdminUser,
    ParsedPath(id): ParsedPath<RecordId>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service.get(id).await?;
    Ok(Json(booking))
}

/// PATCH /api/cms/bookings/:id
pub async fn update_booking(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(id): ParsedPath<RecordId>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let service = BookingService::new(state.service_context());
    let booking = service.update(id, request, &admin.actor()).await?;
    Ok(Json(booking))
}

/// DELETE /api/cms/bookings/:id
pub async fn delete_booking(
    State(state): State<AppState>,
    admin: AdminUser,
    ParsedPath(id): ParsedPath<RecordId>,
) -> ApiResult<Json<DeletedResponse>> {
    let service = BookingService::new(state.service_context());
    let deleted = service.delete(id, &admin.actor()).await?;
    Ok(Json(deleted))
}
