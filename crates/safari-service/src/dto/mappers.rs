//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use safari_core::{AuditLogEntry, Booking, ContentSection, ImageAsset, SiteSetting};

use super::responses::{
    AuditLogResponse, BookingReceipt, BookingResponse, ImageResponse, SectionResponse,
    SettingResponse,
};

// ============================================================================
// Section Mappers
// ============================================================================

impl From<ContentSection> for SectionResponse {
    fn from(section: ContentSection) -> Self {
        Self {
            id: section.id,
            kind: section.kind,
            status: section.status,
            title: section.title,
            subtitle: section.subtitle,
            description: section.description,
            image: section.image,
            images: section.images,
            link_label: section.link_label,
            link_url: section.link_url,
            items: section.items,
            metadata: section.metadata,
            display_order: section.display_order,
            active: section.active,
            published_at: section.published_at,
            created_at: section.created_at,
            updated_at: section.updated_at,
        }
    }
}

impl From<&ContentSection> for SectionResponse {
    fn from(section: &ContentSection) -> Self {
        Self::from(section.clone())
    }
}

// ============================================================================
// Audit Mappers
// ============================================================================

impl From<AuditLogEntry> for AuditLogResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id.as_str().to_string(),
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            created_at: entry.created_at,
        }
    }
}

// ============================================================================
// Setting Mappers
// ============================================================================

impl From<SiteSetting> for SettingResponse {
    fn from(setting: SiteSetting) -> Self {
        Self {
            id: setting.id,
            key: setting.key,
            category: setting.category,
            value: setting.value,
            created_at: setting.created_at,
            updated_at: setting.updated_at,
        }
    }
}

// ============================================================================
// Booking Mappers
// ============================================================================

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            confirmation_number: booking.confirmation_number,
            request_type: booking.request_type,
            full_name: booking.full_name,
            email: booking.email,
            phone: booking.phone,
            country: booking.country,
            package_ref: booking.package_ref,
            destination_ref: booking.destination_ref,
            travel_date: booking.travel_date,
            travelers: booking.travelers,
            message: booking.message,
            status: booking.status,
            admin_notes: booking.admin_notes,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

impl From<&Booking> for BookingReceipt {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            confirmation_number: booking.confirmation_number.clone(),
            request_type: booking.request_type,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

// ============================================================================
// Image Mappers
// ============================================================================

impl From<ImageAsset> for ImageResponse {
    fn from(image: ImageAsset) -> Self {
        Self {
            id: image.id,
            storage_key: image.storage_key,
            url: image.url,
            alt_text: image.alt_text,
            folder: image.folder,
            width: image.width,
            height: image.height,
            uploaded_by: image.uploaded_by,
            created_at: image.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safari_core::{Actor, AuditAction, AuditTarget, RecordId};

    #[test]
    fn test_audit_multiple_target() {
        let entry = AuditLogEntry::new(
            RecordId::new(1),
            AuditAction::Update,
            "faq",
            AuditTarget::Multiple,
            &Actor::new("user_1", "Amani"),
        );
        let response = AuditLogResponse::from(entry);
        assert_eq!(response.entity_id, "multiple");
        assert_eq!(response.actor_name, "Amani");
    }
}
