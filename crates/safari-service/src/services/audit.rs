//! Audit recorder
//!
//! Appends one entry per admin mutation for the activity feed. Recording is
//! best effort: a failed append is logged and never fails the mutation.

use safari_core::{Actor, AuditAction, AuditLogEntry, AuditTarget};
use tracing::{instrument, warn};

use crate::dto::AuditLogResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const MAX_FEED_LIMIT: i64 = 200;

/// Audit recorder
pub struct AuditRecorder<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditRecorder<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an entry; returns whether it was stored
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn record(
        &self,
        action: AuditAction,
        entity_type: &str,
        target: AuditTarget,
        actor: &Actor,
    ) -> bool {
        let entry = AuditLogEntry::new(self.ctx.generate_id(), action, entity_type, target, actor);

        match self.ctx.audit_repo().append(&entry).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    action = %action,
                    entity_type,
                    entity_id = entry.entity_id.as_str(),
                    "Failed to record audit entry"
                );
                false
            }
        }
    }

    /// Most recent entries first
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: i64) -> ServiceResult<Vec<AuditLogResponse>> {
        let entries = self
            .ctx
            .audit_repo()
            .recent(limit.clamp(1, MAX_FEED_LIMIT))
            .await?;

        Ok(entries.into_iter().map(AuditLogResponse::from).collect())
    }
}
