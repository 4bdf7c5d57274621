//! # 게시물 서비스
//!
//! 해시태그 카운터는 게시물 쓰기와 함께 움직입니다.
//!
//! | 동작 | 해시태그 |
//! |------|----------|
//! | 작성 | 본문 태그 전부 +1 |
//! | 수정 | 새로 생긴 태그 +1, 사라진 태그 −1 |
//! | 삭제 | 남아 있던 태그 전부 −1 (0 미만 불가) |

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::social::{HashtagResponse, LikeResponse, PostFilter, PostRequest, PostResponse, TrendingQuery};
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::social::post::Post;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::social::comment_repo::CommentRepository;
use crate::repositories::social::hashtag_repo::HashtagRepository;
use crate::repositories::social::post_repo::PostRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, parse_optional_object_id, require_id};

#[service(name = "post")]
pub struct PostService {
    post_repo: Arc<PostRepository>,
    comment_repo: Arc<CommentRepository>,
    hashtag_repo: Arc<HashtagRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

/// `#Rust` → `rust`
fn normalize_hashtag(raw: &str) -> Option<String> {
    let tag = raw.trim().trim_start_matches('#').to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

/// 피드 필터. `following=true`면 팔로우 목록 안에서만 작성자를 고릅니다.
fn feed_filter(filter: &PostFilter, viewer: Option<&User>) -> Result<Document, AppError> {
    let mut query = doc! {};

    if let Some(tag) = filter.hashtag.as_deref().and_then(normalize_hashtag) {
        query.insert("hashtags", tag);
    }

    let author_id = parse_optional_object_id(filter.author_id.as_deref(), "author_id")?;

    if filter.following.unwrap_or(false) {
        let viewer = viewer.ok_or_else(|| AppError::NotFound(
            "프로필을 찾을 수 없습니다. 먼저 프로필을 생성해주세요".to_string()
        ))?;

        let authors: Vec<ObjectId> = match author_id {
            Some(author_id) => viewer.following.iter().filter(|id| **id == author_id).copied().collect(),
            None => viewer.following.clone(),
        };
        query.insert("author_id", doc! { "$in": authors });
    } else if let Some(author_id) = author_id {
        query.insert("author_id", author_id);
    }

    Ok(query)
}

impl PostService {
    /// 피드 (최신순)
    pub async fn feed(&self, auth: &AuthenticatedUser, filter: &PostFilter, page: &PaginationQuery) -> Result<PaginatedResponse<PostResponse>, AppError> {
        let viewer = self.user_repo.find_by_clerk_id(&auth.user_id).await?;
        let query = feed_filter(filter, viewer.as_ref())?;

        let posts = self.post_repo.feed(query, page).await?;
        let viewer_id = viewer.and_then(|user| user.id);
        self.render_page(posts, viewer_id.as_ref()).await
    }

    pub async fn get(&self, auth: &AuthenticatedUser, post_id: &str) -> Result<PostResponse, AppError> {
        let post = self.post_repo.get(&parse_object_id(post_id, "post_id")?).await?;
        let viewer_id = self.user_repo.find_by_clerk_id(&auth.user_id).await?.and_then(|user| user.id);

        let author = self.user_repo.find_by_id(&post.author_id).await?;
        Ok(PostResponse::new(post, author.as_ref().map(UserSummary::from), viewer_id.as_ref()))
    }

    pub async fn create(&self, auth: &AuthenticatedUser, request: PostRequest) -> Result<PostResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let post = Post::new(my_id, request.content, request.media_urls)?;
        let created = self.post_repo.create(post).await?;
        self.hashtag_repo.increment(&created.hashtags).await?;

        self.activity_service.record(my_id, "post.create", "post", created.id).await;
        Ok(PostResponse::new(created, Some(UserSummary::from(&me)), Some(&my_id)))
    }

    /// 수정 (작성자만)
    pub async fn update(&self, auth: &AuthenticatedUser, post_id: &str, request: PostRequest) -> Result<PostResponse, AppError> {
        let mut post = self.post_repo.get(&parse_object_id(post_id, "post_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if !post.is_owned_by(&my_id) {
            return Err(AppError::AuthorizationError("본인의 게시물만 수정할 수 있습니다".to_string()));
        }

        let change = post.edit(request.content, request.media_urls)?;
        self.post_repo.save(&post).await?;
        self.hashtag_repo.increment(&change.added).await?;
        self.hashtag_repo.decrement(&change.removed).await?;

        self.activity_service.record(my_id, "post.update", "post", post.id).await;
        Ok(PostResponse::new(post, Some(UserSummary::from(&me)), Some(&my_id)))
    }

    /// 삭제 (작성자 또는 관리자). 댓글도 함께 지웁니다.
    pub async fn delete(&self, auth: &AuthenticatedUser, post_id: &str) -> Result<(), AppError> {
        let post_id = parse_object_id(post_id, "post_id")?;
        let post = self.post_repo.get(&post_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        ensure_owner_or_admin(post.is_owned_by(&my_id), auth, "게시물을 삭제할 권한이 없습니다")?;

        self.post_repo.delete(&post_id).await?;
        let removed = self.comment_repo.delete_by_post(&post_id).await?;
        self.hashtag_repo.decrement(&post.hashtags).await?;
        log::debug!("게시물 삭제: {} (댓글 {}건)", post_id, removed);

        self.activity_service.record(my_id, "post.delete", "post", Some(post_id)).await;
        Ok(())
    }

    /// 좋아요 토글
    pub async fn toggle_like(&self, auth: &AuthenticatedUser, post_id: &str) -> Result<LikeResponse, AppError> {
        let mut post = self.post_repo.get(&parse_object_id(post_id, "post_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let liked = post.toggle_like(my_id);
        self.post_repo.save(&post).await?;

        if liked {
            self.activity_service.record(my_id, "post.like", "post", post.id).await;
        }

        Ok(LikeResponse { liked, likes_count: post.likes_count })
    }

    /// 인기 해시태그
    pub async fn trending(&self, query: &TrendingQuery) -> Result<Vec<HashtagResponse>, AppError> {
        let hashtags = self.hashtag_repo.trending(query.limit()).await?;
        Ok(hashtags.into_iter().map(HashtagResponse::from).collect())
    }

    async fn render_page(&self, posts: PaginatedResponse<Post>, viewer_id: Option<&ObjectId>) -> Result<PaginatedResponse<PostResponse>, AppError> {
        let author_ids: Vec<ObjectId> = posts.items.iter().map(|post| post.author_id).collect();
        let authors = self.user_repo.find_by_ids(&author_ids).await?;

        Ok(posts.map(|post| {
            let author = authors
                .iter()
                .find(|user| user.id.as_ref() == Some(&post.author_id))
                .map(UserSummary::from);
            PostResponse::new(post, author, viewer_id)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(following: Vec<ObjectId>) -> User {
        let mut user = User::new("user_1".into(), "a@b.c".into(), "alice".into(), "Alice".into());
        user.id = Some(ObjectId::new());
        user.following = following;
        user
    }

    #[test]
    fn test_normalize_hashtag() {
        assert_eq!(normalize_hashtag("#Rust"), Some("rust".to_string()));
        assert_eq!(normalize_hashtag("  WebDev "), Some("webdev".to_string()));
        assert_eq!(normalize_hashtag("#"), None);
    }

    #[test]
    fn test_feed_filter_by_hashtag_and_author() {
        let author = ObjectId::new();
        let filter = PostFilter {
            hashtag: Some("#Rust".to_string()),
            author_id: Some(author.to_hex()),
            following: None,
        };

        let query = feed_filter(&filter, None).unwrap();
        assert_eq!(query.get_str("hashtags").unwrap(), "rust");
        assert_eq!(query.get_object_id("author_id").unwrap(), author);
    }

    #[test]
    fn test_feed_filter_following() {
        let bob = ObjectId::new();
        let carol = ObjectId::new();
        let me = viewer(vec![bob, carol]);
        let filter = PostFilter { following: Some(true), ..Default::default() };

        let query = feed_filter(&filter, Some(&me)).unwrap();
        let authors = query.get_document("author_id").unwrap().get_array("$in").unwrap();
        assert_eq!(authors.len(), 2);

        // 팔로우하지 않는 작성자를 지정하면 결과가 비도록
        let stranger = PostFilter { following: Some(true), author_id: Some(ObjectId::new().to_hex()), ..Default::default() };
        let query = feed_filter(&stranger, Some(&me)).unwrap();
        assert!(query.get_document("author_id").unwrap().get_array("$in").unwrap().is_empty());
    }

    #[test]
    fn test_following_feed_requires_profile() {
        let filter = PostFilter { following: Some(true), ..Default::default() };
        assert!(matches!(feed_filter(&filter, None), Err(AppError::NotFound(_))));
    }
}
