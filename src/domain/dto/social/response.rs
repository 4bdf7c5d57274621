use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::social::comment::Comment;
use crate::domain::entities::social::hashtag::Hashtag;
use crate::domain::entities::social::message::Message;
use crate::domain::entities::social::post::Post;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub author: Option<UserSummary>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    /// 호출자가 좋아요를 눌렀는지
    pub liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, author: Option<UserSummary>, viewer: Option<&ObjectId>) -> Self {
        let liked = viewer.is_some_and(|viewer| post.likes.contains(viewer));

        Self {
            id: id_hex(&post.id),
            author_id: post.author_id.to_hex(),
            author,
            content: post.content,
            media_urls: post.media_urls,
            hashtags: post.hashtags,
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            liked,
            created_at: to_utc(post.created_at),
            updated_at: to_utc(post.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author: Option<UserSummary>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: Comment, author: Option<UserSummary>) -> Self {
        Self {
            id: id_hex(&comment.id),
            post_id: comment.post_id.to_hex(),
            author_id: comment.author_id.to_hex(),
            author,
            content: comment.content,
            created_at: to_utc(comment.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HashtagResponse {
    pub name: String,
    pub posts_count: i64,
    pub last_used_at: DateTime<Utc>,
}

impl From<Hashtag> for HashtagResponse {
    fn from(hashtag: Hashtag) -> Self {
        Self {
            name: hashtag.name,
            posts_count: hashtag.posts_count,
            last_used_at: to_utc(hashtag.last_used_at),
        }
    }
}

/// 1:1 메시지
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectMessageResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for DirectMessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: id_hex(&message.id),
            sender_id: message.sender_id.to_hex(),
            recipient_id: message.recipient_id.to_hex(),
            content: message.content,
            read: message.read,
            created_at: to_utc(message.created_at),
        }
    }
}

/// 대화 상대별 최신 메시지와 안 읽은 메시지 수
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    pub user_id: String,
    pub user: Option<UserSummary>,
    pub last_message: DirectMessageResponse,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liked_reflects_viewer() {
        let author = ObjectId::new();
        let viewer = ObjectId::new();
        let mut post = Post::new(author, "#rust 시작".to_string(), Vec::new()).unwrap();
        post.toggle_like(viewer);

        assert!(PostResponse::new(post.clone(), None, Some(&viewer)).liked);
        assert!(!PostResponse::new(post.clone(), None, Some(&author)).liked);
        assert!(!PostResponse::new(post, None, None).liked);
    }
}
