//! PostgreSQL implementation of ImageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use safari_core::entities::ImageAsset;
use safari_core::error::DomainError;
use safari_core::traits::{ImageRepository, RepoResult};
use safari_core::value_objects::RecordId;

use crate::models::ImageAssetModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ImageAsset>> {
        let result = sqlx::query_as::<_, ImageAssetModel>(
            r#"
            SELECT id, storage_key, url, alt_text, folder, width, height, uploaded_by, created_at
            FROM image_assets
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ImageAsset::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, folder: Option<&str>, limit: i64) -> RepoResult<Vec<ImageAsset>> {
        let results = sqlx::query_as::<_, ImageAssetModel>(
            r#"
            SELECT id, storage_key, url, alt_text, folder, width, height, uploaded_by, created_at
            FROM image_assets
            WHERE $1::text IS NULL OR folder = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(folder)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ImageAsset::from).collect())
    }

    #[instrument(skip(self, image), fields(key = %image.storage_key))]
    async fn create(&self, image: &ImageAsset) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO image_assets (id, storage_key, url, alt_text, folder, width, height,
                                      uploaded_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(image.id.into_inner())
        .bind(&image.storage_key)
        .bind(&image.url)
        .bind(&image.alt_text)
        .bind(&image.folder)
        .bind(image.width)
        .bind(image.height)
        .bind(&image.uploaded_by)
        .bind(image.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ImageKeyExists(image.storage_key.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM image_assets WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
