use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `reviews` 컬렉션 문서. 사용자당 강좌당 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub course_id: ObjectId,
    pub user_id: ObjectId,
    /// 1~5
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Review {
    pub fn new(course_id: ObjectId, user_id: ObjectId, rating: i32, comment: Option<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            course_id,
            user_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}
