//! 관리자 통계 서비스
//!
//! 모든 수치는 요청 시점에 컬렉션에서 바로 집계합니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use mongodb::bson::doc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::admin::{AnalyticsResponse, StatusCount};
use crate::domain::dto::courses::CourseSummary;
use crate::domain::entities::jobs::application::ApplicationStatus;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::jobs::application_repo::ApplicationRepository;
use crate::repositories::jobs::job_repo::JobRepository;
use crate::repositories::social::post_repo::PostRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::time_utils::from_utc;

/// 인기 강좌 개수
const TOP_COURSES: i64 = 5;

/// 신규 가입자 집계 기간
const NEW_USER_WINDOW_DAYS: i64 = 30;

#[service(name = "analytics")]
pub struct AnalyticsService {
    user_repo: Arc<UserRepository>,
    course_repo: Arc<CourseRepository>,
    post_repo: Arc<PostRepository>,
    job_repo: Arc<JobRepository>,
    application_repo: Arc<ApplicationRepository>,
}

impl AnalyticsService {
    pub async fn overview(&self) -> Result<AnalyticsResponse, AppError> {
        let since = from_utc(Utc::now() - Duration::days(NEW_USER_WINDOW_DAYS));

        let totals = self.course_repo.totals().await?;

        let mut applications_by_status = Vec::with_capacity(ApplicationStatus::ALL.len());
        for status in ApplicationStatus::ALL {
            let count = self.application_repo.count_by_status(status).await?;
            applications_by_status.push(StatusCount { status, count });
        }

        let top_courses = self.course_repo.top_by_students(TOP_COURSES).await?;

        Ok(AnalyticsResponse {
            total_users: self.user_repo.count(doc! {}).await?,
            new_users_last_30_days: self.user_repo.count_created_since(since).await?,
            total_courses: self.course_repo.count(doc! {}).await?,
            published_courses: self.course_repo.count(doc! { "is_published": true }).await?,
            total_enrollments: totals.enrollments,
            estimated_revenue: totals.revenue,
            total_posts: self.post_repo.count(doc! {}).await?,
            total_jobs: self.job_repo.count(doc! {}).await?,
            active_jobs: self.job_repo.count(doc! { "is_active": true }).await?,
            applications_by_status,
            top_courses: top_courses.iter().map(CourseSummary::from).collect(),
        })
    }
}
