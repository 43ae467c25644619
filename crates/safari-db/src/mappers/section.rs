//! Content section entity <-> model mapper

use safari_core::entities::{ContentSection, PublishStatus, SectionKind};
use safari_core::error::DomainError;
use safari_core::value_objects::RecordId;

use crate::models::ContentSectionModel;

/// Rows carry the kind as text; an unknown tag means the table was written by something else
impl TryFrom<ContentSectionModel> for ContentSection {
    type Error = DomainError;

    fn try_from(model: ContentSectionModel) -> Result<Self, Self::Error> {
        let kind = model.kind.parse::<SectionKind>().map_err(|_| {
            DomainError::DatabaseError(format!(
                "content_sections row {} has unknown kind '{}'",
                model.id, model.kind
            ))
        })?;

        Ok(ContentSection {
            id: RecordId::new(model.id),
            kind,
            status: PublishStatus::from_db(&model.status),
            title: model.title,
            subtitle: model.subtitle,
            description: model.description,
            image: model.image,
            images: model.images,
            link_label: model.link_label,
            link_url: model.link_url,
            items: model.items,
            metadata: model.metadata,
            display_order: model.display_order,
            active: model.active,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Map a batch of rows, failing on the first malformed one
pub fn sections_from_models(
    models: Vec<ContentSectionModel>,
) -> Result<Vec<ContentSection>, DomainError> {
    models.into_iter().map(ContentSection::try_from).collect()
}
