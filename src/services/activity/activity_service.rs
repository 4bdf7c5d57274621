//! 활동 로그 서비스
//!
//! 다른 서비스가 의미 있는 쓰기(수강신청, 게시물 작성, 지원 등) 후
//! [`ActivityService::record`]를 호출합니다. 기록 실패는 요청 결과에 영향을 주지 않습니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::activity::ActivityResponse;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::entities::activity::activity_log::ActivityLog;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::activity::activity_repo::ActivityRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::require_id;

#[service(name = "activity")]
pub struct ActivityService {
    activity_repo: Arc<ActivityRepository>,
    user_repo: Arc<UserRepository>,
}

impl ActivityService {
    pub async fn record(&self, user_id: ObjectId, action: &str, resource_type: &str, resource_id: Option<ObjectId>) {
        self.activity_repo
            .record(ActivityLog::new(user_id, action, resource_type, resource_id))
            .await;
    }

    pub async fn record_with(&self, user_id: ObjectId, action: &str, resource_type: &str, resource_id: Option<ObjectId>, metadata: Document) {
        self.activity_repo
            .record(ActivityLog::new(user_id, action, resource_type, resource_id).with_metadata(metadata))
            .await;
    }

    pub async fn list_mine(&self, auth: &AuthenticatedUser, page: &PaginationQuery) -> Result<PaginatedResponse<ActivityResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let logs = self.activity_repo.list(doc! { "user_id": require_id(&me.id)? }, page).await?;

        Ok(logs.map(ActivityResponse::from))
    }

    /// 관리자용 전체 로그
    pub async fn list_all(&self, page: &PaginationQuery) -> Result<PaginatedResponse<ActivityResponse>, AppError> {
        let logs = self.activity_repo.list(doc! {}, page).await?;
        Ok(logs.map(ActivityResponse::from))
    }
}
