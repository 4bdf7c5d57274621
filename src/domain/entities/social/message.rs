use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `messages` 컬렉션 문서 (1:1 메시지)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub sender_id: ObjectId,
    pub recipient_id: ObjectId,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime,
}

impl Message {
    pub fn new(sender_id: ObjectId, recipient_id: ObjectId, content: String) -> Self {
        Self {
            id: None,
            sender_id,
            recipient_id,
            content,
            read: false,
            created_at: DateTime::now(),
        }
    }
}
