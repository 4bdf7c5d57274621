use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::courses::CourseSummary;
use crate::domain::dto::jobs::JobResponse;
use crate::domain::dto::social::PostResponse;
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::activity::activity_log::ActivityLog;
use crate::domain::entities::activity::search_history::SearchHistory;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

/// 통합 검색 결과. 요청한 `kind`에 해당하지 않는 목록은 비어 있습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub courses: Vec<CourseSummary>,
    pub users: Vec<UserSummary>,
    pub posts: Vec<PostResponse>,
    pub jobs: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchHistoryResponse {
    pub id: String,
    pub query: String,
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SearchHistory> for SearchHistoryResponse {
    fn from(entry: SearchHistory) -> Self {
        Self {
            id: id_hex(&entry.id),
            query: entry.query,
            kind: entry.kind,
            created_at: to_utc(entry.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: id_hex(&log.id),
            user_id: log.user_id.to_hex(),
            action: log.action,
            resource_type: log.resource_type,
            resource_id: log.resource_id.map(|id| id.to_hex()),
            metadata: log.metadata.map(|metadata| Bson::Document(metadata).into_relaxed_extjson()),
            created_at: to_utc(log.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn test_metadata_rendered_as_json() {
        let log = ActivityLog::new(ObjectId::new(), "course.enroll", "course", Some(ObjectId::new()))
            .with_metadata(doc! { "price": 30.0, "title": "Rust" });

        let response = ActivityResponse::from(log);
        let metadata = response.metadata.unwrap();

        assert_eq!(metadata["title"], "Rust");
        assert_eq!(metadata["price"], 30.0);
    }
}
