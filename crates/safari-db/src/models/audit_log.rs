//! Audit log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    /// 'CREATE', 'UPDATE' or 'DELETE'
    pub action: String,
    pub entity_type: String,
    /// Record id, or 'multiple' for batch operations
    pub entity_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub created_at: DateTime<Utc>,
}
