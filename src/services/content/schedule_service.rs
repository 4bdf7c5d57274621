//! 개인 학습 일정 서비스
//!
//! 일정은 본인만 보고 고칠 수 있습니다. 남의 일정 ID는 404로 응답합니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::content::{ScheduleFilter, ScheduleRequest, ScheduleResponse};
use crate::domain::entities::content::schedule::{validate_time_range, Schedule};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::content::schedule_repo::ScheduleRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::{parse_object_id, parse_optional_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time_utils::from_utc;

#[service(name = "schedule")]
pub struct ScheduleService {
    schedule_repo: Arc<ScheduleRepository>,
    user_repo: Arc<UserRepository>,
}

/// 요청을 일정에 반영합니다. 시간 범위와 강좌 ID를 검증합니다.
fn apply_request(schedule: &mut Schedule, request: ScheduleRequest) -> Result<(), AppError> {
    let start_time = from_utc(request.start_time);
    let end_time = from_utc(request.end_time);
    validate_time_range(start_time, end_time)?;

    schedule.title = request.title.trim().to_string();
    schedule.description = clean_optional_string(request.description);
    schedule.course_id = parse_optional_object_id(request.course_id.as_deref(), "course_id")?;
    schedule.start_time = start_time;
    schedule.end_time = end_time;
    schedule.location = clean_optional_string(request.location);
    Ok(())
}

impl ScheduleService {
    /// 내 일정 (시작 시각순)
    pub async fn list(&self, auth: &AuthenticatedUser, filter: &ScheduleFilter) -> Result<Vec<ScheduleResponse>, AppError> {
        let my_id = self.caller_id(auth).await?;
        let schedules = self.schedule_repo
            .list_by_user(&my_id, filter.from.map(from_utc), filter.to.map(from_utc))
            .await?;

        Ok(schedules.into_iter().map(ScheduleResponse::from).collect())
    }

    pub async fn create(&self, auth: &AuthenticatedUser, request: ScheduleRequest) -> Result<ScheduleResponse, AppError> {
        let my_id = self.caller_id(auth).await?;

        let now = DateTime::now();
        let mut schedule = Schedule {
            id: None,
            user_id: my_id,
            title: String::new(),
            description: None,
            course_id: None,
            start_time: now,
            end_time: now,
            location: None,
            created_at: now,
            updated_at: now,
        };
        apply_request(&mut schedule, request)?;

        let created = self.schedule_repo.create(schedule).await?;
        Ok(ScheduleResponse::from(created))
    }

    pub async fn update(&self, auth: &AuthenticatedUser, schedule_id: &str, request: ScheduleRequest) -> Result<ScheduleResponse, AppError> {
        let my_id = self.caller_id(auth).await?;
        let mut schedule = self.load_own(&my_id, schedule_id).await?;

        apply_request(&mut schedule, request)?;
        schedule.updated_at = DateTime::now();
        self.schedule_repo.save(&schedule).await?;

        Ok(ScheduleResponse::from(schedule))
    }

    pub async fn delete(&self, auth: &AuthenticatedUser, schedule_id: &str) -> Result<(), AppError> {
        let my_id = self.caller_id(auth).await?;
        let schedule = self.load_own(&my_id, schedule_id).await?;

        self.schedule_repo.delete(&require_id(&schedule.id)?).await?;
        Ok(())
    }

    async fn load_own(&self, user_id: &ObjectId, schedule_id: &str) -> Result<Schedule, AppError> {
        let id = parse_object_id(schedule_id, "schedule_id")?;

        match self.schedule_repo.find_by_id(&id).await? {
            Some(schedule) if &schedule.user_id == user_id => Ok(schedule),
            _ => Err(AppError::NotFound("일정을 찾을 수 없습니다".to_string())),
        }
    }

    async fn caller_id(&self, auth: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        require_id(&me.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn blank(user_id: ObjectId) -> Schedule {
        let now = DateTime::now();
        Schedule {
            id: None,
            user_id,
            title: String::new(),
            description: None,
            course_id: None,
            start_time: now,
            end_time: now,
            location: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(start_offset_hours: i64, end_offset_hours: i64) -> ScheduleRequest {
        let base = Utc::now();
        ScheduleRequest {
            title: " 스터디 ".to_string(),
            description: None,
            course_id: None,
            start_time: base + Duration::hours(start_offset_hours),
            end_time: base + Duration::hours(end_offset_hours),
            location: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_apply_request() {
        let mut schedule = blank(ObjectId::new());

        apply_request(&mut schedule, request(1, 2)).unwrap();

        assert_eq!(schedule.title, "스터디");
        assert_eq!(schedule.location, None);
        assert!(schedule.end_time > schedule.start_time);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut schedule = blank(ObjectId::new());
        assert!(matches!(apply_request(&mut schedule, request(2, 1)), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_bad_course_id_rejected() {
        let mut schedule = blank(ObjectId::new());
        let mut bad = request(1, 2);
        bad.course_id = Some("xyz".to_string());

        assert!(matches!(apply_request(&mut schedule, bad), Err(AppError::ValidationError(_))));
    }
}
