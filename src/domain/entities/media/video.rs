use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `videos` 컬렉션 문서
///
/// Bunny Stream 라이브러리는 전체 사용자가 공유하므로, 비디오 GUID와 생성자를 여기에 기록합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub guid: String,
    pub owner_id: ObjectId,
    pub title: String,
    pub created_at: DateTime,
}

impl Video {
    pub fn new(guid: String, owner_id: ObjectId, title: String) -> Self {
        Self {
            id: None,
            guid,
            owner_id,
            title,
            created_at: DateTime::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.owner_id == user_id
    }
}
