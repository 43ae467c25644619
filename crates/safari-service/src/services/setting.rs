//! Site settings
//!
//! Key/value settings grouped by category. Writes are an upsert keyed on
//! `key`, so saving a setting that does not exist yet creates it.

use safari_core::{Actor, AuditAction, AuditTarget, DomainError};
use tracing::{info, instrument};

use crate::dto::{SettingResponse, UpsertSettingRequest, UpsertSettingResponse};

use super::audit::AuditRecorder;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub const SETTING_ENTITY: &str = "setting";

/// Setting service
pub struct SettingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, category: Option<&str>) -> ServiceResult<Vec<SettingResponse>> {
        let settings = self.ctx.setting_repo().find_by_category(category).await?;
        Ok(settings.into_iter().map(SettingResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> ServiceResult<SettingResponse> {
        self.ctx
            .setting_repo()
            .find_by_key(key)
            .await?
            .map(SettingResponse::from)
            .ok_or_else(|| DomainError::SettingNotFound(key.to_string()).into())
    }

    /// Create or replace the setting named by `request.key`
    #[instrument(skip(self, request, actor), fields(key = %request.key, actor_id = %actor.id))]
    pub async fn upsert(
        &self,
        request: UpsertSettingRequest,
        actor: &Actor,
    ) -> ServiceResult<UpsertSettingResponse> {
        let (setting, outcome) = self
            .ctx
            .setting_repo()
            .upsert(
                self.ctx.generate_id(),
                &request.key,
                request.category.as_deref(),
                &request.value,
            )
            .await?;

        let action = if outcome.is_created() {
            AuditAction::Create
        } else {
            AuditAction::Update
        };
        info!(setting_id = %setting.id, action = %action, "Setting saved");

        AuditRecorder::new(self.ctx)
            .record(action, SETTING_ENTITY, AuditTarget::record(setting.id), actor)
            .await;

        Ok(UpsertSettingResponse {
            setting: setting.into(),
            created: outcome.is_created(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRepositories;
    use serde_json::json;

    fn request(value: serde_json::Value) -> UpsertSettingRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_creates_missing_key() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SettingService::new(&ctx);
        let actor = Actor::new("user_1", "Amani");

        let created = service
            .upsert(request(json!({ "key": "meta", "value": { "title": "Safaris" } })), &actor)
            .await
            .unwrap();
        assert!(created.created);
        assert_eq!(created.setting.category, "general");

        let updated = service
            .upsert(
                request(json!({ "key": "meta", "value": { "title": "Tanzania Safaris" } })),
                &actor,
            )
            .await
            .unwrap();
        assert!(!updated.created);
        assert_eq!(updated.setting.id, created.setting.id);
        assert_eq!(updated.setting.category, "general");
        assert_eq!(updated.setting.value["title"], "Tanzania Safaris");

        let actions: Vec<AuditAction> = repos.audit.entries().iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Create, AuditAction::Update]);
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let repos = TestRepositories::new();
        let ctx = repos.context().unwrap();
        let service = SettingService::new(&ctx);
        let actor = Actor::new("user_1", "Amani");

        for (key, category) in [("phone", "contact"), ("email", "contact"), ("meta", "seo")] {
            service
                .upsert(
                    request(json!({ "key": key, "category": category, "value": key })),
                    &actor,
                )
                .await
                .unwrap();
        }

        let contact = service.list(Some("contact")).await.unwrap();
        let keys: Vec<&str> = contact.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["email", "phone"]);
        assert_eq!(service.list(None).await.unwrap().len(), 3);

        assert_eq!(service.get("meta").await.unwrap().category, "seo");
        assert_eq!(service.get("missing").await.unwrap_err().status_code(), 404);
    }
}
