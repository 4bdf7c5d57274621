//! 댓글 서비스
//!
//! 댓글 수(`comments_count`)는 게시물 문서에 `$inc`로 반영합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::social::{CommentRequest, CommentResponse};
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::social::comment::Comment;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::social::comment_repo::CommentRepository;
use crate::repositories::social::post_repo::PostRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};

#[service(name = "comment")]
pub struct CommentService {
    comment_repo: Arc<CommentRepository>,
    post_repo: Arc<PostRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

impl CommentService {
    /// 게시물 댓글 (오래된 순)
    pub async fn list(&self, post_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<CommentResponse>, AppError> {
        let post_id = parse_object_id(post_id, "post_id")?;
        self.post_repo.get(&post_id).await?;

        let comments = self.comment_repo.list_by_post(&post_id, page).await?;
        let author_ids: Vec<_> = comments.items.iter().map(|comment| comment.author_id).collect();
        let authors = self.user_repo.find_by_ids(&author_ids).await?;

        Ok(comments.map(|comment| {
            let author = authors
                .iter()
                .find(|user| user.id.as_ref() == Some(&comment.author_id))
                .map(UserSummary::from);
            CommentResponse::new(comment, author)
        }))
    }

    pub async fn create(&self, auth: &AuthenticatedUser, post_id: &str, request: CommentRequest) -> Result<CommentResponse, AppError> {
        let post_id = parse_object_id(post_id, "post_id")?;
        self.post_repo.get(&post_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let comment = Comment::new(post_id, my_id, request.content.trim().to_string());
        let created = self.comment_repo.create(comment).await?;
        self.post_repo.adjust_comments_count(&post_id, 1).await?;

        self.activity_service.record(my_id, "comment.create", "post", Some(post_id)).await;
        Ok(CommentResponse::new(created, Some(UserSummary::from(&me))))
    }

    /// 삭제 (댓글 작성자, 게시물 작성자, 관리자)
    pub async fn delete(&self, auth: &AuthenticatedUser, comment_id: &str) -> Result<(), AppError> {
        let comment_id = parse_object_id(comment_id, "comment_id")?;
        let comment = self.comment_repo.find_by_id(&comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("댓글을 찾을 수 없습니다".to_string()))?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let post = self.post_repo.find_by_id(&comment.post_id).await?;
        let is_post_author = post.as_ref().is_some_and(|post| post.is_owned_by(&my_id));

        ensure_owner_or_admin(comment.author_id == my_id || is_post_author, auth, "댓글을 삭제할 권한이 없습니다")?;

        self.comment_repo.delete(&comment_id).await?;
        if post.is_some() {
            self.post_repo.adjust_comments_count(&comment.post_id, -1).await?;
        }

        self.activity_service.record(my_id, "comment.delete", "post", Some(comment.post_id)).await;
        Ok(())
    }
}
