use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::activity::search_history::SearchHistory,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::repositories::common::find_all;

#[repository(name = "search_history", collection = "search_histories")]
pub struct SearchHistoryRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl SearchHistoryRepository {
    /// 검색 자체를 실패시키지 않도록 저장 오류는 경고만 남깁니다.
    pub async fn record(&self, entry: SearchHistory) {
        if let Err(e) = self.collection::<SearchHistory>().insert_one(&entry).await {
            log::warn!("⚠️ 검색 기록 저장 실패: {}", e);
        }
    }

    pub async fn recent(&self, user_id: &ObjectId, limit: i64) -> Result<Vec<SearchHistory>, AppError> {
        find_all(
            &self.collection::<SearchHistory>(),
            doc! { "user_id": *user_id },
            doc! { "created_at": -1 },
            Some(limit),
        ).await
    }

    pub async fn clear(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<SearchHistory>()
            .delete_many(doc! { "user_id": *user_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        self.collection::<SearchHistory>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
