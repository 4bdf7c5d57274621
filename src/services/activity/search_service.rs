//! # 통합 검색 서비스
//!
//! `GET /api/search?q=&kind=`는 강좌(공개), 사용자, 게시물, 채용 공고(활성)를
//! 종류별로 최대 [`SEARCH_LIMIT`]개씩 찾습니다.
//!
//! 로그인했고 프로필이 있는 호출자의 검색어는 검색 기록에 남깁니다.
//! 익명 검색은 기록하지 않습니다.

use std::sync::Arc;
use mongodb::bson::DateTime;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::activity::{SearchHistoryResponse, SearchKind, SearchQuery, SearchResponse};
use crate::domain::dto::common::PaginationQuery;
use crate::domain::dto::courses::CourseSummary;
use crate::domain::dto::jobs::JobResponse;
use crate::domain::dto::social::PostResponse;
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::activity::search_history::SearchHistory;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::activity::search_history_repo::SearchHistoryRepository;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::jobs::job_repo::JobRepository;
use crate::repositories::social::post_repo::PostRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::require_id;

/// 종류별 최대 결과 수
pub const SEARCH_LIMIT: i64 = 10;

/// 검색 기록 조회 개수
pub const HISTORY_LIMIT: i64 = 20;

#[service(name = "search")]
pub struct SearchService {
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
    post_repo: Arc<PostRepository>,
    job_repo: Arc<JobRepository>,
    search_history_repo: Arc<SearchHistoryRepository>,
}

/// 검색어를 다듬습니다. 없거나 공백뿐이면 400.
fn normalize_term(q: Option<&str>) -> Result<String, AppError> {
    match q.map(str::trim) {
        Some(term) if !term.is_empty() => Ok(term.to_string()),
        _ => Err(AppError::ValidationError("검색어(q)는 필수입니다".to_string())),
    }
}

impl SearchService {
    pub async fn search(&self, auth: Option<&AuthenticatedUser>, query: &SearchQuery) -> Result<SearchResponse, AppError> {
        let term = normalize_term(query.q.as_deref())?;
        let kind = query.kind.unwrap_or_default();

        let viewer = match auth {
            Some(auth) => self.user_repo.find_by_clerk_id(&auth.user_id).await?,
            None => None,
        };
        let viewer_id = viewer.as_ref().and_then(|user| user.id);

        let mut response = SearchResponse { query: term.clone(), ..Default::default() };

        if kind.includes(SearchKind::Courses) {
            let courses = self.course_repo.search_published(&term, SEARCH_LIMIT).await?;
            response.courses = courses.iter().map(CourseSummary::from).collect();
        }

        if kind.includes(SearchKind::Users) {
            let users = self.user_repo
                .search(&term, &PaginationQuery::new(1, SEARCH_LIMIT as u64))
                .await?;
            response.users = users.items.iter().map(UserSummary::from).collect();
        }

        if kind.includes(SearchKind::Posts) {
            let posts = self.post_repo.search(&term, SEARCH_LIMIT).await?;
            let author_ids: Vec<_> = posts.iter().map(|post| post.author_id).collect();
            let authors = self.user_repo.find_by_ids(&author_ids).await?;

            response.posts = posts
                .into_iter()
                .map(|post| {
                    let author = authors
                        .iter()
                        .find(|user| user.id.as_ref() == Some(&post.author_id))
                        .map(UserSummary::from);
                    PostResponse::new(post, author, viewer_id.as_ref())
                })
                .collect();
        }

        if kind.includes(SearchKind::Jobs) {
            let jobs = self.job_repo.search_active(&term, SEARCH_LIMIT).await?;
            response.jobs = jobs.into_iter().map(JobResponse::from).collect();
        }

        if let Some(user_id) = viewer_id {
            self.search_history_repo
                .record(SearchHistory {
                    id: None,
                    user_id,
                    query: term,
                    kind: Some(kind.as_str().to_string()),
                    created_at: DateTime::now(),
                })
                .await;
        }

        Ok(response)
    }

    /// 내 최근 검색어 (최신순)
    pub async fn history(&self, auth: &AuthenticatedUser) -> Result<Vec<SearchHistoryResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let entries = self.search_history_repo.recent(&require_id(&me.id)?, HISTORY_LIMIT).await?;

        Ok(entries.into_iter().map(SearchHistoryResponse::from).collect())
    }

    /// 내 검색 기록 전체 삭제. 지운 개수를 돌려줍니다.
    pub async fn clear_history(&self, auth: &AuthenticatedUser) -> Result<u64, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let removed = self.search_history_repo.clear(&require_id(&me.id)?).await?;

        log::debug!("검색 기록 삭제: {} ({}건)", me.username, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term(Some("  rust ")).unwrap(), "rust");
        assert!(matches!(normalize_term(Some("   ")), Err(AppError::ValidationError(_))));
        assert!(matches!(normalize_term(None), Err(AppError::ValidationError(_))));
    }
}
