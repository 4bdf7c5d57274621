//! 활동 로그 리포지토리
//!
//! 기록은 최선 노력(best effort)입니다. 저장에 실패해도 경고만 남기고
//! 호출한 요청은 그대로 성공합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::activity::activity_log::ActivityLog,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::find_page;

#[repository(name = "activity", collection = "activity_logs")]
pub struct ActivityRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ActivityRepository {
    pub async fn record(&self, entry: ActivityLog) {
        if let Err(e) = self.collection::<ActivityLog>().insert_one(&entry).await {
            log::warn!("⚠️ 활동 로그 기록 실패 ({} {}): {}", entry.action, entry.resource_type, e);
        }
    }

    /// 최신순
    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<ActivityLog>, AppError> {
        find_page(&self.collection::<ActivityLog>(), filter, doc! { "created_at": -1 }, page).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        self.collection::<ActivityLog>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
