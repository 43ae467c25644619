//! Audit log entry <-> model mapper

use safari_core::entities::{AuditAction, AuditLogEntry, AuditTarget};
use safari_core::error::DomainError;
use safari_core::value_objects::RecordId;

use crate::models::AuditLogModel;

impl TryFrom<AuditLogModel> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        let action = AuditAction::from_db(&model.action).ok_or_else(|| {
            DomainError::DatabaseError(format!("audit_logs row {} has unknown action", model.id))
        })?;

        Ok(AuditLogEntry {
            id: RecordId::new(model.id),
            action,
            entity_type: model.entity_type,
            entity_id: AuditTarget::from_db(model.entity_id),
            actor_id: model.actor_id,
            actor_name: model.actor_name,
            created_at: model.created_at,
        })
    }
}
