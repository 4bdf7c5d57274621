//! 관리자 통계 DTO

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::courses::CourseSummary;
use crate::domain::entities::jobs::application::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub total_users: u64,
    pub new_users_last_30_days: u64,
    pub total_courses: u64,
    pub published_courses: u64,
    /// 전체 강좌의 `total_students` 합
    pub total_enrollments: i64,
    /// 강좌별 `price × total_students` 합
    pub estimated_revenue: f64,
    pub total_posts: u64,
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub applications_by_status: Vec<StatusCount>,
    pub top_courses: Vec<CourseSummary>,
}
