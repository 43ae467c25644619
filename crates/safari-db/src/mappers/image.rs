//! Image asset <-> model mapper

use safari_core::entities::ImageAsset;
use safari_core::value_objects::RecordId;

use crate::models::ImageAssetModel;

impl From<ImageAssetModel> for ImageAsset {
    fn from(model: ImageAssetModel) -> Self {
        ImageAsset {
            id: RecordId::new(model.id),
            storage_key: model.storage_key,
            url: model.url,
            alt_text: model.alt_text,
            folder: model.folder,
            width: model.width,
            height: model.height,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at,
        }
    }
}
