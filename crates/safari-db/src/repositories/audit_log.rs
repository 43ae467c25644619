//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use safari_core::entities::AuditLogEntry;
use safari_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_db_error;

/// Append-only; there is deliberately no update or delete statement here
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action, entity_type = %entry.entity_type))]
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, action, entity_type, entity_id, actor_id, actor_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.into_inner())
        .bind(entry.action.as_str())
        .bind(&entry.entity_type)
        .bind(entry.entity_id.as_str())
        .bind(&entry.actor_id)
        .bind(&entry.actor_name)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AuditLogEntry>> {
        let results = sqlx::query_as::<_, AuditLogModel>(
            r#"
            SELECT id, action, entity_type, entity_id, actor_id, actor_name, created_at
            FROM audit_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AuditLogEntry::try_from).collect()
    }
}
