//! Site setting <-> model mapper

use safari_core::entities::SiteSetting;
use safari_core::value_objects::RecordId;

use crate::models::SiteSettingModel;

impl From<SiteSettingModel> for SiteSetting {
    fn from(model: SiteSettingModel) -> Self {
        SiteSetting {
            id: RecordId::new(model.id),
            key: model.key,
            category: model.category,
            value: model.value,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
