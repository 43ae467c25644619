//! Booking <-> model mapper

use safari_core::entities::{Booking, BookingStatus, RequestType};
use safari_core::value_objects::RecordId;

use crate::models::BookingModel;

impl From<BookingModel> for Booking {
    fn from(model: BookingModel) -> Self {
        Booking {
            id: RecordId::new(model.id),
            confirmation_number: model.confirmation_number,
            request_type: RequestType::from_db(&model.request_type),
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            country: model.country,
            package_ref: model.package_ref,
            destination_ref: model.destination_ref,
            travel_date: model.travel_date,
            travelers: model.travelers,
            message: model.message,
            status: BookingStatus::from_db(&model.status),
            admin_notes: model.admin_notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
