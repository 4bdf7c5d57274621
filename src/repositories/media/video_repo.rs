use std::sync::Arc;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::media::video::Video,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, insert_error, AppError};
use crate::repositories::common::inserted_object_id;

#[repository(name = "video", collection = "videos")]
pub struct VideoRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl VideoRepository {
    /// 등록되지 않은 GUID는 404
    pub async fn get_by_guid(&self, guid: &str) -> Result<Video, AppError> {
        self.collection::<Video>()
            .find_one(doc! { "guid": guid })
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("비디오를 찾을 수 없습니다".to_string()))
    }

    pub async fn create(&self, mut video: Video) -> Result<Video, AppError> {
        let result = self.collection::<Video>()
            .insert_one(&video)
            .await
            .map_err(|e| insert_error(e, || AppError::ConflictError("이미 등록된 비디오입니다".to_string())))?;

        video.id = Some(inserted_object_id(&result)?);
        Ok(video)
    }

    pub async fn delete_by_guid(&self, guid: &str) -> Result<bool, AppError> {
        let result = self.collection::<Video>()
            .delete_one(doc! { "guid": guid })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let guid_index = IndexModel::builder()
            .keys(doc! { "guid": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("guid_unique".to_string())
                .build())
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("owner_created_at".to_string())
                .build())
            .build();

        self.collection::<Video>()
            .create_indexes([guid_index, owner_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
