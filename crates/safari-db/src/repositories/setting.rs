//! PostgreSQL implementation of SettingRepository

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::instrument;

use safari_core::entities::{SiteSetting, UpsertOutcome, DEFAULT_SETTING_CATEGORY};
use safari_core::traits::{RepoResult, SettingRepository};
use safari_core::value_objects::RecordId;

use crate::models::{SiteSettingModel, UpsertedSettingModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgSettingRepository {
    pool: PgPool,
}

impl PgSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for PgSettingRepository {
    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<SiteSetting>> {
        let result = sqlx::query_as::<_, SiteSettingModel>(
            r#"
            SELECT id, key, category, value, created_at, updated_at
            FROM site_settings
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SiteSetting::from))
    }

    #[instrument(skip(self))]
    async fn find_by_category(&self, category: Option<&str>) -> RepoResult<Vec<SiteSetting>> {
        let results = sqlx::query_as::<_, SiteSettingModel>(
            r#"
            SELECT id, key, category, value, created_at, updated_at
            FROM site_settings
            WHERE $1::text IS NULL OR category = $1
            ORDER BY key ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SiteSetting::from).collect())
    }

    /// `xmax = 0` only holds for a freshly inserted tuple
    #[instrument(skip(self, value))]
    async fn upsert(
        &self,
        id: RecordId,
        key: &str,
        category: Option<&str>,
        value: &JsonValue,
    ) -> RepoResult<(SiteSetting, UpsertOutcome)> {
        let row = sqlx::query_as::<_, UpsertedSettingModel>(
            r#"
            INSERT INTO site_settings (id, key, category, value, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, $5), $4, NOW(), NOW())
            ON CONFLICT (key) DO UPDATE
            SET category = COALESCE($3, site_settings.category),
                value = EXCLUDED.value,
                updated_at = NOW()
            RETURNING id, key, category, value, created_at, updated_at, (xmax = 0) AS inserted
            "#,
        )
        .bind(id.into_inner())
        .bind(key)
        .bind(category)
        .bind(value)
        .bind(DEFAULT_SETTING_CATEGORY)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let outcome = if row.inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        };

        Ok((SiteSetting::from(row.setting), outcome))
    }
}
