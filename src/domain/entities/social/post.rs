//! 피드 게시글 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::utils::string_utils::extract_hashtags;

pub const MAX_POST_LENGTH: usize = 5000;

/// `posts` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author_id: ObjectId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub likes: Vec<ObjectId>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 본문 변경 전후 해시태그 차이
#[derive(Debug, Default, PartialEq)]
pub struct HashtagChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl Post {
    pub fn new(author_id: ObjectId, content: String, media_urls: Vec<String>) -> Result<Self, AppError> {
        validate_body(&content, &media_urls)?;

        let now = DateTime::now();
        Ok(Self {
            id: None,
            author_id,
            hashtags: extract_hashtags(&content),
            content,
            media_urls,
            likes: Vec::new(),
            likes_count: 0,
            comments_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.author_id == user_id
    }

    /// 본문/미디어를 교체하고 해시태그 변화를 돌려줍니다.
    pub fn edit(&mut self, content: String, media_urls: Vec<String>) -> Result<HashtagChange, AppError> {
        validate_body(&content, &media_urls)?;

        let new_tags = extract_hashtags(&content);
        let change = HashtagChange {
            added: new_tags.iter().filter(|t| !self.hashtags.contains(t)).cloned().collect(),
            removed: self.hashtags.iter().filter(|t| !new_tags.contains(t)).cloned().collect(),
        };

        self.content = content;
        self.media_urls = media_urls;
        self.hashtags = new_tags;
        self.updated_at = DateTime::now();

        Ok(change)
    }

    /// 좋아요 토글. 토글 후 좋아요 상태를 돌려줍니다.
    pub fn toggle_like(&mut self, user_id: ObjectId) -> bool {
        let liked = if self.likes.contains(&user_id) {
            self.likes.retain(|id| id != &user_id);
            false
        } else {
            self.likes.push(user_id);
            true
        };
        self.likes_count = self.likes.len() as i64;
        liked
    }
}

/// 본문은 5000자 이하. 미디어가 없으면 본문이 필수입니다.
fn validate_body(content: &str, media_urls: &[String]) -> Result<(), AppError> {
    if content.chars().count() > MAX_POST_LENGTH {
        return Err(AppError::ValidationError(format!(
            "게시글은 {}자 이하여야 합니다", MAX_POST_LENGTH
        )));
    }
    if content.trim().is_empty() && media_urls.is_empty() {
        return Err(AppError::ValidationError("게시글 내용 또는 미디어가 필요합니다".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_or_media_required() {
        assert!(Post::new(ObjectId::new(), "   ".into(), vec![]).is_err());
        assert!(Post::new(ObjectId::new(), "".into(), vec!["https://cdn/x.png".into()]).is_ok());
        assert!(Post::new(ObjectId::new(), "a".repeat(5001), vec![]).is_err());
        assert!(Post::new(ObjectId::new(), "가".repeat(5000), vec![]).is_ok());
    }

    #[test]
    fn test_hashtags_extracted_on_create() {
        let post = Post::new(ObjectId::new(), "오늘도 #Rust #rust #actix".into(), vec![]).unwrap();
        assert_eq!(post.hashtags, vec!["rust", "actix"]);
    }

    #[test]
    fn test_edit_reports_hashtag_change() {
        let mut post = Post::new(ObjectId::new(), "#rust #mongo".into(), vec![]).unwrap();
        let change = post.edit("#rust #redis".into(), vec![]).unwrap();

        assert_eq!(change.added, vec!["redis"]);
        assert_eq!(change.removed, vec!["mongo"]);
        assert_eq!(post.hashtags, vec!["rust", "redis"]);
    }

    #[test]
    fn test_toggle_like() {
        let mut post = Post::new(ObjectId::new(), "hi".into(), vec![]).unwrap();
        let user = ObjectId::new();

        assert!(post.toggle_like(user));
        assert_eq!(post.likes_count, 1);
        assert!(!post.toggle_like(user));
        assert_eq!(post.likes_count, 0);
    }
}
