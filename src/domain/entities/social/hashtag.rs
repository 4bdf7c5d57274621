use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `hashtags` 컬렉션 문서. 게시글 작성/수정/삭제에 따라 `posts_count`가 움직입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소문자, unique
    pub name: String,
    #[serde(default)]
    pub posts_count: i64,
    pub last_used_at: DateTime,
}
