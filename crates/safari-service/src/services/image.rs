//! Image registry
//!
//! Metadata rows for objects uploaded to the image bucket. The bytes never
//! pass through this service; the public URL is derived from the storage key.

use chrono::Utc;
use safari_core::{Actor, AuditAction, AuditTarget, DomainError, ImageAsset, RecordId};
use tracing::{info, instrument};

use crate::dto::{DeletedResponse, ImageResponse, RegisterImageRequest};

use super::audit::AuditRecorder;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub const IMAGE_ENTITY: &str = "image";
pub const MAX_IMAGE_PAGE: i64 = 200;

/// Image service
pub struct ImageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ImageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, folder: Option<&str>, limit: i64) -> ServiceResult<Vec<ImageResponse>> {
        let images = self
            .ctx
            .image_repo()
            .list(folder, limit.clamp(1, MAX_IMAGE_PAGE))
            .await?;
        Ok(images.into_iter().map(ImageResponse::from).collect())
    }

    #[instrument(skip(self, request, actor), fields(storage_key = %request.storage_key, actor_id = %actor.id))]
    pub async fn register(
        &self,
        request: RegisterImageRequest,
        actor: &Actor,
    ) -> ServiceResult<ImageResponse> {
        let storage_key = request.storage_key.trim_start_matches('/').to_string();
        let image = ImageAsset {
            id: self.ctx.generate_id(),
            url: ImageAsset::public_url(&self.ctx.storage().public_base_url, &storage_key),
            storage_key,
            alt_text: request.alt_text,
            folder: request.folder,
            width: request.width,
            height: request.height,
            uploaded_by: actor.id.clone(),
            created_at: Utc::now(),
        };

        self.ctx.image_repo().create(&image).await?;

        info!(image_id = %image.id, bucket = %self.ctx.storage().bucket, "Image registered");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Create, IMAGE_ENTITY, AuditTarget::record(image.id), actor)
            .await;

        Ok(image.into())
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, id: RecordId, actor: &Actor) -> ServiceResult<DeletedResponse> {
        if !self.ctx.image_repo().delete(id).await? {
            return Err(DomainError::ImageNotFound(id).into());
        }

        info!(image_id = %id, "Image removed from registry");

        AuditRecorder::new(self.ctx)
            .record(AuditAction::Delete, IMAGE_ENTITY, AuditTarget::record(id), actor)
            .await;

        Ok(DeletedResponse::new(id))
    }
}
