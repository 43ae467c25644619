//! Booking and quote requests
//!
//! Visitors submit requests from the public site; admins search, annotate,
//! confirm or cancel them from the CMS.

use chrono::Utc;
use safari_core::{
    generate_confirmation_number, Actor, AuditAction, AuditTarget, Booking, BookingQuery,
    BookingStatus, DomainError, RecordId,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    BookingReceipt, BookingResponse, CreateBookingRequest, DeletedResponse, PaginatedResponse,
    UpdateBookingRequest,
};

use super::audit::AuditRecorder;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const BOOKING_ENTITY: &str = "booking";

/// Fresh confirmation numbers drawn before giving up on collisions
const CONFIRMATION_ATTEMPTS: usize = 5;

/// Booking service
pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a visitor's booking or quote request as `pending`
    #[instrument(skip(self, request), fields(request_type = request.request_type.as_str()))]
    pub async fn submit(&self, request: CreateBookingRequest) -> ServiceResult<BookingReceipt> {
        let now = Utc::now();
        let mut booking = Booking {
            id: self.ctx.generate_id(),
            confirmation_number: generate_confirmation_number(),
            request_type: request.request_type,
            full_name: request.full_name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone,
            country: request.country,
            package_ref: request.package_ref,
            destination_ref: request.destination_ref,
            travel_date: request.travel_date,
            travelers: request.travelers,
            message: request.message,
            status: BookingStatus::Pending,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };

        for attempt in 1..=CONFIRMATION_ATTEMPTS {
            match self.ctx.booking_repo().create(&booking).await {
                Ok(()) => {
                    info!(
                        booking_id = %booking.id,
                        confirmation_number = %booking.confirmation_number,
                        "Booking submitted"
                    );
                    return Ok(BookingReceipt::from(&booking));
                }
                Err(DomainError::ConfirmationNumberExists) => {
                    warn!(attempt, "Confirmation number collision, drawing a new one");
                    booking.confirmation_number = generate_confirmation_number();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "Could not allocate a unique confirmation number",
        ))
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: BookingQuery) -> ServiceResult<PaginatedResponse<BookingResponse>> {
        let page = self.ctx.booking_repo().search(&query).await?;

        Ok(PaginatedResponse::new(
            page.items.into_iter().map(BookingResponse::from).collect(),
            query.page,
            query.limit,
            page.total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: RecordId) -> ServiceResult<BookingResponse> {
        Ok(self.find(id).await?.into())
    }

    /// Change status, notes or trip details
    #[instrument(skip(self, request, actor), fields(actor_id = %actor.id))]
    pub async fn update(
        &self,
        id: RecordId,
        request: UpdateBookingRequest,
        actor: &Actor,
    ) -> ServiceResult<BookingResponse> {
        let mut booking = self.find(id).await?;

        if let Some(status) = request.status {
            booking.status = status;
        }
        if let Some(notes) = request.admin_notes {
            booking.admin_notes = Some(notes);
        }
        if let Some(date) = request.travel_date {
            booking.travel_date = Some(date);
        }
        if let Some(travelers) = request.travelers {
            booking.travelers = travelers;
        }
        booking.updated_at = Utc::now();

        self.ctx.booking_repo().update(&booking).await?;

        info!(booking_id = %id, status = booking.status.as_str(), "Booking updated");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Update, BOOKING_ENTITY, AuditTarget::record(id), actor)
            .await;

        Ok(booking.into())
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, id: RecordId, actor: &Actor) -> ServiceResult<DeletedResponse> {
        if !self.ctx.booking_repo().delete(id).await? {
            return Err(DomainError::BookingNotFound(id).into());
        }

        info!(booking_id = %id, "Booking deleted");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Delete, BOOKING_ENTITY, AuditTarget::record(id), actor)
            .await;

        Ok(DeletedResponse::new(id))
    }

    async fn find(&self, id: RecordId) -> ServiceResult<Booking> {
        self.ctx
            .booking_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::BookingNotFound(id).into())
    }
}
