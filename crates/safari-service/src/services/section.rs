//! Content publish workflow
//!
//! Reads pick the draft-inclusive editor view or the published view; writes
//! apply the DRAFT/PUBLISHED transition and then run the side effects in a
//! fixed order:
//!
//! 1. persist the row (failure fails the call)
//! 2. append an audit entry (best effort)
//! 3. ask the renderer to revalidate the affected pages (best effort, detached)
//! 4. on publish, fire the deploy hook (detached, see [`DetachedRebuild`])

use chrono::Utc;
use safari_core::{
    Actor, AuditAction, AuditTarget, ContentSection, DomainError, ReadMode, RecordId, SectionKind,
    SectionQuery,
};
use tracing::{info, instrument};

use crate::dto::{
    CreateSectionRequest, DeletedResponse, DeleteRequest, ReorderRequest, ReorderResponse,
    SectionRead, SectionResponse, UpdateSectionRequest,
};

use super::audit::AuditRecorder;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::rebuild::DetachedRebuild;
use super::revalidate::Revalidator;

/// A committed write and the rebuild it started, if any
#[derive(Debug)]
pub struct Mutation<T> {
    pub record: T,
    pub rebuild: Option<DetachedRebuild>,
}

impl<T> Mutation<T> {
    /// Let any rebuild run unobserved and keep the record
    pub fn into_record(self) -> T {
        if let Some(rebuild) = self.rebuild {
            rebuild.detach();
        }
        self.record
    }
}

/// Section service
pub struct SectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SectionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rows of a kind as seen by `mode`; an empty result is not an error
    #[instrument(skip(self))]
    pub async fn fetch_section(&self, kind: SectionKind, mode: ReadMode) -> ServiceResult<SectionRead> {
        let query = SectionQuery::resolve(kind, mode);
        let rows = self.ctx.section_repo().find(&query).await?;

        Ok(SectionRead::shape(
            kind,
            mode,
            rows.into_iter().map(SectionResponse::from).collect(),
        ))
    }

    /// One row of a kind, only if the public may see it
    #[instrument(skip(self))]
    pub async fn get_public(&self, kind: SectionKind, id: RecordId) -> ServiceResult<SectionResponse> {
        self.find_of_kind(kind, id)
            .await?
            .filter(ContentSection::is_publicly_visible)
            .map(SectionResponse::from)
            .ok_or_else(|| DomainError::SectionNotFound(id).into())
    }

    /// Create a row; drafts unless `publish` is set
    #[instrument(skip(self, request, actor), fields(actor_id = %actor.id))]
    pub async fn create(
        &self,
        kind: SectionKind,
        request: CreateSectionRequest,
        actor: &Actor,
    ) -> ServiceResult<Mutation<SectionResponse>> {
        let now = Utc::now();
        let mut section =
            ContentSection::new(self.ctx.generate_id(), kind, request.fields.into_patch(), now);
        if request.publish {
            section.set_publication(true, now);
        }

        self.ctx.section_repo().create(&section).await?;

        info!(section_id = %section.id, kind = %kind, status = section.status.as_str(), "Section created");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Create, kind.as_str(), AuditTarget::record(section.id), actor)
            .await;

        let rebuild = section.is_published().then(|| self.published(kind));

        Ok(Mutation {
            record: section.into(),
            rebuild,
        })
    }

    /// Apply field updates and the publish flag to an existing row
    #[instrument(skip(self, request, actor), fields(actor_id = %actor.id, publish = request.publish))]
    pub async fn update_section(
        &self,
        kind: SectionKind,
        request: UpdateSectionRequest,
        actor: &Actor,
    ) -> ServiceResult<Mutation<SectionResponse>> {
        let id = request
            .id
            .ok_or_else(|| ServiceError::validation("id is required"))?;

        let mut section = self
            .find_of_kind(kind, id)
            .await?
            .ok_or(DomainError::SectionNotFound(id))?;
        let was_published = section.is_published();

        section.apply(request.fields.into_patch());
        section.set_publication(request.publish, Utc::now());

        self.ctx.section_repo().update(&section).await?;

        info!(section_id = %id, kind = %kind, status = section.status.as_str(), "Section updated");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Update, kind.as_str(), AuditTarget::record(id), actor)
            .await;

        let rebuild = if request.publish {
            Some(self.published(kind))
        } else {
            if was_published {
                Revalidator::new(self.ctx).request(kind, "unpublish");
            }
            None
        };

        Ok(Mutation {
            record: section.into(),
            rebuild,
        })
    }

    /// Hard delete one row of a kind
    #[instrument(skip(self, request, actor), fields(actor_id = %actor.id))]
    pub async fn delete(
        &self,
        kind: SectionKind,
        request: DeleteRequest,
        actor: &Actor,
    ) -> ServiceResult<DeletedResponse> {
        let id = request
            .id
            .ok_or_else(|| ServiceError::validation("id is required"))?;

        let removed = self
            .ctx
            .section_repo()
            .delete(kind, id)
            .await?
            .ok_or(DomainError::SectionNotFound(id))?;

        info!(section_id = %id, kind = %kind, "Section deleted");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Delete, kind.as_str(), AuditTarget::record(id), actor)
            .await;

        if removed.is_published() {
            Revalidator::new(self.ctx).request(kind, "delete");
        }

        Ok(DeletedResponse::new(id))
    }

    /// Assign display orders as one all-or-nothing batch
    #[instrument(skip(self, request, actor), fields(actor_id = %actor.id, count = request.slides.len()))]
    pub async fn reorder(
        &self,
        kind: SectionKind,
        request: ReorderRequest,
        actor: &Actor,
    ) -> ServiceResult<ReorderResponse> {
        let orders = request.orders();
        if orders.is_empty() {
            return Err(DomainError::EmptyReorder.into());
        }

        self.ctx.section_repo().reorder(kind, &orders).await?;

        info!(kind = %kind, count = orders.len(), "Sections reordered");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Update, kind.as_str(), AuditTarget::Multiple, actor)
            .await;

        if !kind.is_single() {
            Revalidator::new(self.ctx).request(kind, "reorder");
        }

        Ok(ReorderResponse {
            kind,
            updated: orders.len(),
        })
    }

    async fn find_of_kind(
        &self,
        kind: SectionKind,
        id: RecordId,
    ) -> ServiceResult<Option<ContentSection>> {
        Ok(self
            .ctx
            .section_repo()
            .find_by_id(id)
            .await?
            .filter(|s| s.kind == kind))
    }

    fn published(&self, kind: SectionKind) -> DetachedRebuild {
        Revalidator::new(self.ctx).request(kind, "publish");
        self.ctx.rebuild().trigger_detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::SectionData;
    use crate::testing::TestRepositories;
    use chrono::Duration;
    use safari_core::{PublishStatus, SectionPatch};
    use serde_json::json;

    fn editor() -> Actor {
        Actor::new("user_editor", "Amani")
    }

    fn section(id: i64, kind: SectionKind, published: bool) -> ContentSection {
        let created = Utc::now() - Duration::minutes(10);
        let mut section = ContentSection::new(
            RecordId::new(id),
            kind,
            SectionPatch {
                title: Some(format!("{kind} {id}")),
                ..SectionPatch::default()
            },
            created,
        );
        if published {
            section.set_publication(true, created);
        }
        section
    }

    fn seeded(repos: &TestRepositories, id: i64, kind: SectionKind, published: bool) -> ContentSection {
        let section = section(id, kind, published);
        repos.sections.seed(section.clone());
        section
    }

    fn create_request(value: serde_json::Value) -> CreateSectionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_gallery_defaults() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        let created = service
            .create(
                SectionKind::Gallery,
                create_request(json!({ "title": "Gorilla Trek", "images": ["a.webp"] })),
                &editor(),
            )
            .await
            .unwrap();

        assert!(created.rebuild.is_none());
        let record = created.into_record();
        assert_eq!(record.display_order, 0);
        assert!(record.active);
        assert_eq!(record.status, PublishStatus::Draft);
        assert_eq!(record.images, vec!["a.webp".to_string()]);

        let audit = repos.audit.entries();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::Create);
        assert_eq!(audit[0].entity_type, "gallery");
        assert_eq!(audit[0].actor_name, "Amani");
    }

    #[tokio::test]
    async fn test_draft_never_visible_publicly() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        let draft = seeded(&repos, 1, SectionKind::Faq, false);
        seeded(&repos, 2, SectionKind::Faq, true);

        let public = service
            .fetch_section(SectionKind::Faq, ReadMode::Public)
            .await
            .unwrap();
        let SectionData::Many(rows) = public.data else {
            panic!("faq reads are lists");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, RecordId::new(2));

        assert!(service.get_public(SectionKind::Faq, draft.id).await.is_err());

        let cms = service
            .fetch_section(SectionKind::Faq, ReadMode::Cms)
            .await
            .unwrap();
        assert_eq!(cms.len(), 2);
    }

    #[tokio::test]
    async fn test_cms_shows_inactive_rows() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        seeded(&repos, 3, SectionKind::Testimonial, true);
        let mut hidden = section(4, SectionKind::Testimonial, true);
        hidden.active = false;
        repos.sections.seed(hidden);

        let public = service
            .fetch_section(SectionKind::Testimonial, ReadMode::Public)
            .await
            .unwrap();
        assert_eq!(public.len(), 1);

        let cms = service
            .fetch_section(SectionKind::Testimonial, ReadMode::Cms)
            .await
            .unwrap();
        assert_eq!(cms.len(), 2);
    }

    #[tokio::test]
    async fn test_single_kind_latest_published_wins() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        seeded(&repos, 10, SectionKind::Hero, true);
        let mut newer = section(11, SectionKind::Hero, false);
        newer.set_publication(true, Utc::now());
        repos.sections.seed(newer);
        seeded(&repos, 12, SectionKind::Hero, false);

        let read = service
            .fetch_section(SectionKind::Hero, ReadMode::Public)
            .await
            .unwrap();
        let SectionData::One(Some(row)) = read.data else {
            panic!("expected a single hero");
        };
        assert_eq!(row.id, RecordId::new(11));
    }

    #[tokio::test]
    async fn test_public_multi_row_order() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        for (id, order) in [(1, 2), (2, 0), (3, 1)] {
            let mut step = section(id, SectionKind::Step, true);
            step.display_order = order;
            repos.sections.seed(step);
        }

        let read = service
            .fetch_section(SectionKind::Step, ReadMode::Public)
            .await
            .unwrap();
        let SectionData::Many(rows) = read.data else {
            panic!("step reads are lists");
        };
        let ids: Vec<RecordId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId::new(2), RecordId::new(3), RecordId::new(1)]);
    }

    #[tokio::test]
    async fn test_publish_then_revert() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        let original = seeded(&repos, 5, SectionKind::About, false);

        let request: UpdateSectionRequest =
            serde_json::from_value(json!({ "id": "5", "publish": true, "title": "Our story" })).unwrap();
        let published = service
            .update_section(SectionKind::About, request, &editor())
            .await
            .unwrap();

        let outcome = published.rebuild.unwrap().join().await.unwrap();
        assert!(!outcome.triggered);
        assert_eq!(outcome.reason.as_deref(), Some("No deploy hook configured"));

        let record = published.record;
        assert_eq!(record.status, PublishStatus::Published);
        assert_eq!(record.title.as_deref(), Some("Our story"));
        let published_at = record.published_at.unwrap();
        assert!(published_at >= original.updated_at);

        let revert: UpdateSectionRequest =
            serde_json::from_value(json!({ "id": "5", "publish": false })).unwrap();
        let reverted = service
            .update_section(SectionKind::About, revert, &editor())
            .await
            .unwrap();
        assert!(reverted.rebuild.is_none());
        assert_eq!(reverted.record.status, PublishStatus::Draft);
        assert_eq!(reverted.record.published_at, Some(published_at));
        assert_eq!(reverted.record.title.as_deref(), Some("Our story"));
    }

    #[tokio::test]
    async fn test_update_without_id_touches_nothing() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);

        let err = service
            .update_section(SectionKind::Cta, UpdateSectionRequest::default(), &editor())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(repos.sections.write_count(), 0);
        assert!(repos.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_update_wrong_kind_is_not_found() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        seeded(&repos, 6, SectionKind::Banner, false);

        let request: UpdateSectionRequest =
            serde_json::from_value(json!({ "id": "6", "publish": true })).unwrap();
        let err = service
            .update_section(SectionKind::Cta, request, &editor())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_write() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        repos.audit.set_failing(true);

        let created = service
            .create(
                SectionKind::Partner,
                create_request(json!({ "title": "KWS", "publish": true })),
                &editor(),
            )
            .await
            .unwrap();

        assert_eq!(created.record.status, PublishStatus::Published);
        assert_eq!(repos.sections.len(), 1);
        assert!(repos.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_hook_does_not_fail_publish() {
        let repos = TestRepositories::new();
        let ctx = repos
            .context_with_hook(Some("http://127.0.0.1:9/hook".to_string()))
            .unwrap();
        let service = SectionService::new(&ctx);

        let created = service
            .create(
                SectionKind::Highlight,
                create_request(json!({ "title": "Big Five", "publish": true })),
                &editor(),
            )
            .await
            .unwrap();

        let outcome = created.rebuild.unwrap().join().await.unwrap();
        assert!(!outcome.triggered);
        assert_eq!(repos.sections.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        seeded(&repos, 7, SectionKind::Stat, true);

        let request = DeleteRequest {
            id: Some(RecordId::new(7)),
        };
        let deleted = service
            .delete(SectionKind::Stat, request.clone(), &editor())
            .await
            .unwrap();
        assert!(deleted.deleted);
        assert!(repos.sections.is_empty());

        let err = service
            .delete(SectionKind::Stat, request, &editor())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let actions: Vec<AuditAction> = repos.audit.entries().iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Delete]);
    }

    #[tokio::test]
    async fn test_reorder_applies_batch() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        for id in 1..=3 {
            seeded(&repos, id, SectionKind::TeamMember, true);
        }

        let request: ReorderRequest = serde_json::from_value(json!({
            "slides": [
                { "id": "1", "displayOrder": 2 },
                { "id": "2", "displayOrder": 0 },
                { "id": "3", "displayOrder": 1 }
            ]
        }))
        .unwrap();
        let response = service
            .reorder(SectionKind::TeamMember, request, &editor())
            .await
            .unwrap();

        assert_eq!(response.updated, 3);
        assert_eq!(repos.sections.get(RecordId::new(1)).unwrap().display_order, 2);
        assert_eq!(repos.sections.get(RecordId::new(2)).unwrap().display_order, 0);

        let audit = repos.audit.entries();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].entity_id, AuditTarget::Multiple);
    }

    #[tokio::test]
    async fn test_reorder_with_missing_id_is_all_or_nothing() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SectionService::new(&ctx);
        for id in [1, 2, 4] {
            seeded(&repos, id, SectionKind::Feature, true);
        }

        let request: ReorderRequest = serde_json::from_value(json!({
            "slides": [
                { "id": "1", "displayOrder": 9 },
                { "id": "3", "displayOrder": 8 },
                { "id": "2", "displayOrder": 7 },
                { "id": "4", "displayOrder": 6 }
            ]
        }))
        .unwrap();
        let err = service
            .reorder(SectionKind::Feature, request, &editor())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
        for id in [1, 2, 4] {
            assert_eq!(repos.sections.get(RecordId::new(id)).unwrap().display_order, 0);
        }
        assert_eq!(repos.sections.write_count(), 0);
        assert!(repos.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        repos.sections.fail_reads(true);

        let err = SectionService::new(&ctx)
            .fetch_section(SectionKind::Gallery, ReadMode::Public)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
