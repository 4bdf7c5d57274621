use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

/// `activity_logs` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    /// 예: `course.created`, `course.enrolled`, `application.submitted`
    pub action: String,
    pub resource_type: String,
    #[serde(default)]
    pub resource_id: Option<ObjectId>,
    #[serde(default)]
    pub metadata: Option<Document>,
    pub created_at: DateTime,
}

impl ActivityLog {
    pub fn new(user_id: ObjectId, action: &str, resource_type: &str, resource_id: Option<ObjectId>) -> Self {
        Self {
            id: None,
            user_id,
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id,
            metadata: None,
            created_at: DateTime::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: Document) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
