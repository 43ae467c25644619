//! PostgreSQL implementation of SectionRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use safari_core::entities::{ContentSection, SectionKind, SectionOrder, SectionQuery};
use safari_core::traits::{RepoResult, SectionRepository};
use safari_core::value_objects::RecordId;

use crate::mappers::sections_from_models;
use crate::models::ContentSectionModel;

use super::error::{map_db_error, section_not_found};

const SECTION_COLUMNS: &str = "id, kind, status, title, subtitle, description, image, images, \
     link_label, link_url, items, metadata, display_order, active, published_at, \
     created_at, updated_at";

/// PostgreSQL implementation of SectionRepository
#[derive(Clone)]
pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    /// Create a new PgSectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(order: SectionOrder) -> &'static str {
    match order {
        SectionOrder::DisplayOrder => "display_order ASC, created_at ASC, id ASC",
        SectionOrder::LatestPublished => "published_at DESC NULLS LAST, id DESC",
        SectionOrder::Recency => "updated_at DESC, id DESC",
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ContentSection>> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM content_sections WHERE id = $1");
        let result = sqlx::query_as::<_, ContentSectionModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(ContentSection::try_from).transpose()
    }

    /// The status/active predicates live in the statement itself
    #[instrument(skip(self))]
    async fn find(&self, query: &SectionQuery) -> RepoResult<Vec<ContentSection>> {
        let sql = format!(
            r#"
            SELECT {SECTION_COLUMNS}
            FROM content_sections
            WHERE kind = $1
              AND ($2 = FALSE OR status = 'PUBLISHED')
              AND ($3 = FALSE OR active = TRUE)
            ORDER BY {}
            LIMIT $4
            "#,
            order_clause(query.order)
        );

        let results = sqlx::query_as::<_, ContentSectionModel>(&sql)
            .bind(query.kind.as_str())
            .bind(query.published_only)
            .bind(query.active_only)
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        sections_from_models(results)
    }

    #[instrument(skip(self, section), fields(id = %section.id, kind = %section.kind))]
    async fn create(&self, section: &ContentSection) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO content_sections (id, kind, status, title, subtitle, description, image,
                                          images, link_label, link_url, items, metadata,
                                          display_order, active, published_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(section.id.into_inner())
        .bind(section.kind.as_str())
        .bind(section.status.as_str())
        .bind(&section.title)
        .bind(&section.subtitle)
        .bind(&section.description)
        .bind(&section.image)
        .bind(&section.images)
        .bind(&section.link_label)
        .bind(&section.link_url)
        .bind(&section.items)
        .bind(&section.metadata)
        .bind(section.display_order)
        .bind(section.active)
        .bind(section.published_at)
        .bind(section.created_at)
        .bind(section.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, section), fields(id = %section.id, kind = %section.kind))]
    async fn update(&self, section: &ContentSection) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE content_sections
            SET status = $3, title = $4, subtitle = $5, description = $6, image = $7,
                images = $8, link_label = $9, link_url = $10, items = $11, metadata = $12,
                display_order = $13, active = $14, published_at = $15, updated_at = $16
            WHERE id = $1 AND kind = $2
            "#,
        )
        .bind(section.id.into_inner())
        .bind(section.kind.as_str())
        .bind(section.status.as_str())
        .bind(&section.title)
        .bind(&section.subtitle)
        .bind(&section.description)
        .bind(&section.image)
        .bind(&section.images)
        .bind(&section.link_label)
        .bind(&section.link_url)
        .bind(&section.items)
        .bind(&section.metadata)
        .bind(section.display_order)
        .bind(section.active)
        .bind(section.published_at)
        .bind(section.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(section_not_found(section.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: SectionKind, id: RecordId) -> RepoResult<Option<ContentSection>> {
        let sql = format!(
            "DELETE FROM content_sections WHERE id = $1 AND kind = $2 RETURNING {SECTION_COLUMNS}"
        );
        let result = sqlx::query_as::<_, ContentSectionModel>(&sql)
            .bind(id.into_inner())
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(ContentSection::try_from).transpose()
    }

    #[instrument(skip(self, orders), fields(count = orders.len()))]
    async fn reorder(&self, kind: SectionKind, orders: &[(RecordId, i32)]) -> RepoResult<()> {
        let now = Utc::now();
        // Dropping the transaction without commit rolls back every earlier update
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (id, display_order) in orders {
            let result = sqlx::query(
                r#"
                UPDATE content_sections
                SET display_order = $3, updated_at = $4
                WHERE id = $1 AND kind = $2
                "#,
            )
            .bind(id.into_inner())
            .bind(kind.as_str())
            .bind(display_order)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                tracing::debug!(%id, "Reorder target missing, rolling back");
                return Err(section_not_found(*id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
