use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use crate::utils::string_utils::not_blank;

pub const DEFAULT_TRENDING_LIMIT: i64 = 10;
pub const MAX_TRENDING_LIMIT: i64 = 50;

/// 게시물 작성 / 수정
///
/// 본문 길이와 "본문 또는 미디어 필수" 규칙은 `Post` 엔티티가 검증합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PostRequest {
    #[serde(default)]
    pub content: String,
    #[validate(length(max = 10, message = "미디어는 최대 10개까지 첨부할 수 있습니다"))]
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// `GET /api/posts` 필터
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostFilter {
    /// `#` 없이, 대소문자 무시
    pub hashtag: Option<String>,
    pub author_id: Option<String>,
    /// `true`면 내가 팔로우하는 사용자의 게시물만
    pub following: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(custom(function = "not_blank"))]
    #[validate(length(min = 1, max = 2000, message = "댓글은 1-2000자 사이여야 합니다"))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendingQuery {
    /// 기본 10, 최대 50
    pub limit: Option<i64>,
}

impl TrendingQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_TRENDING_LIMIT).clamp(1, MAX_TRENDING_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    pub recipient_id: String,
    #[validate(custom(function = "not_blank"))]
    #[validate(length(min = 1, max = 5000, message = "메시지는 1-5000자 사이여야 합니다"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_length() {
        assert!(CommentRequest { content: "좋은 글이네요".to_string() }.validate().is_ok());
        assert!(CommentRequest { content: "   ".to_string() }.validate().is_err());
        assert!(CommentRequest { content: "a".repeat(2001) }.validate().is_err());
    }

    #[test]
    fn test_message_length() {
        let message = |content: String| SendMessageRequest {
            recipient_id: "65f000000000000000000000".to_string(),
            content,
        };

        assert!(message("안녕하세요".to_string()).validate().is_ok());
        assert!(message(String::new()).validate().is_err());
        assert!(message("a".repeat(5001)).validate().is_err());
    }

    #[test]
    fn test_trending_limit_clamped() {
        assert_eq!(TrendingQuery::default().limit(), 10);
        assert_eq!(TrendingQuery { limit: Some(500) }.limit(), 50);
        assert_eq!(TrendingQuery { limit: Some(0) }.limit(), 1);
    }
}
