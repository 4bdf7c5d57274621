//! # 채용공고 서비스
//!
//! 공개 목록에는 활성 공고만 나옵니다. 작성자 본인은 `GET /api/jobs/mine`에서
//! 비활성 공고까지 볼 수 있습니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::jobs::{JobFilter, JobRequest, JobResponse, PatchJobRequest};
use crate::domain::entities::jobs::job::{CustomQuestion, Job};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::common::contains_ignore_case;
use crate::repositories::jobs::application_repo::ApplicationRepository;
use crate::repositories::jobs::job_repo::JobRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time_utils::from_utc;

#[service(name = "job")]
pub struct JobService {
    job_repo: Arc<JobRepository>,
    application_repo: Arc<ApplicationRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

fn active_filter(filter: &JobFilter) -> Document {
    let mut query = doc! { "is_active": true };

    if let Some(job_type) = filter.job_type {
        query.insert("job_type", job_type.as_str());
    }
    if let Some(location) = clean_optional_string(filter.location.clone()) {
        query.insert("location", contains_ignore_case(&location));
    }
    if let Some(search) = clean_optional_string(filter.search.clone()) {
        let pattern = contains_ignore_case(&search);
        query.insert("$or", vec![
            doc! { "title": pattern.clone() },
            doc! { "company": pattern.clone() },
            doc! { "description": pattern },
        ]);
    }

    query
}

fn apply_replace(job: &mut Job, request: JobRequest) {
    job.title = request.title.trim().to_string();
    job.company = request.company.trim().to_string();
    job.description = request.description;
    job.location = clean_optional_string(request.location);
    job.job_type = request.job_type.unwrap_or_default();
    job.salary_min = request.salary_min;
    job.salary_max = request.salary_max;
    job.custom_questions = request.custom_questions.into_iter().map(CustomQuestion::from).collect();
    job.is_active = request.is_active.unwrap_or(true);
    job.deadline = request.deadline.map(from_utc);
}

fn apply_patch(job: &mut Job, request: PatchJobRequest) {
    if let Some(title) = request.title {
        job.title = title.trim().to_string();
    }
    if let Some(company) = request.company {
        job.company = company.trim().to_string();
    }
    if let Some(description) = request.description {
        job.description = description;
    }
    if request.location.is_some() {
        job.location = clean_optional_string(request.location);
    }
    if let Some(job_type) = request.job_type {
        job.job_type = job_type;
    }
    if request.salary_min.is_some() {
        job.salary_min = request.salary_min;
    }
    if request.salary_max.is_some() {
        job.salary_max = request.salary_max;
    }
    if let Some(questions) = request.custom_questions {
        job.custom_questions = questions.into_iter().map(CustomQuestion::from).collect();
    }
    if let Some(is_active) = request.is_active {
        job.is_active = is_active;
    }
    if let Some(deadline) = request.deadline {
        job.deadline = Some(from_utc(deadline));
    }
}

impl JobService {
    pub async fn list(&self, filter: &JobFilter, page: &PaginationQuery) -> Result<PaginatedResponse<JobResponse>, AppError> {
        let jobs = self.job_repo.list(active_filter(filter), page).await?;
        Ok(jobs.map(JobResponse::from))
    }

    pub async fn mine(&self, auth: &AuthenticatedUser, page: &PaginationQuery) -> Result<PaginatedResponse<JobResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let jobs = self.job_repo.list(doc! { "posted_by": require_id(&me.id)? }, page).await?;
        Ok(jobs.map(JobResponse::from))
    }

    pub async fn get(&self, job_id: &str) -> Result<JobResponse, AppError> {
        let job = self.job_repo.get(&parse_object_id(job_id, "job_id")?).await?;
        Ok(JobResponse::from(job))
    }

    /// # Errors
    ///
    /// * `ValidationError` - 급여가 음수이거나 `salary_min > salary_max`
    pub async fn create(&self, auth: &AuthenticatedUser, request: JobRequest) -> Result<JobResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let mut job = Job::new(String::new(), String::new(), String::new(), my_id);
        apply_replace(&mut job, request);
        job.validate_salary()?;

        let created = self.job_repo.create(job).await?;
        log::info!("💼 채용공고 등록: {} @ {}", created.title, created.company);

        self.activity_service.record(my_id, "job.create", "job", created.id).await;
        Ok(JobResponse::from(created))
    }

    pub async fn replace(&self, auth: &AuthenticatedUser, job_id: &str, request: JobRequest) -> Result<JobResponse, AppError> {
        let (mut job, my_id) = self.load_for_write(auth, job_id).await?;

        apply_replace(&mut job, request);
        job.validate_salary()?;
        job.touch();
        self.job_repo.save(&job).await?;

        self.activity_service.record(my_id, "job.update", "job", job.id).await;
        Ok(JobResponse::from(job))
    }

    pub async fn patch(&self, auth: &AuthenticatedUser, job_id: &str, request: PatchJobRequest) -> Result<JobResponse, AppError> {
        let (mut job, my_id) = self.load_for_write(auth, job_id).await?;

        apply_patch(&mut job, request);
        job.validate_salary()?;
        job.touch();
        self.job_repo.save(&job).await?;

        self.activity_service.record(my_id, "job.update", "job", job.id).await;
        Ok(JobResponse::from(job))
    }

    /// 공고와 그 지원서를 삭제합니다.
    pub async fn delete(&self, auth: &AuthenticatedUser, job_id: &str) -> Result<(), AppError> {
        let (job, my_id) = self.load_for_write(auth, job_id).await?;
        let id = require_id(&job.id)?;

        self.job_repo.delete(&id).await?;
        let removed = self.application_repo.delete_by_job(&id).await?;
        log::info!("🗑️ 채용공고 삭제: {} (지원서 {}건)", job.title, removed);

        self.activity_service.record(my_id, "job.delete", "job", Some(id)).await;
        Ok(())
    }

    async fn load_for_write(&self, auth: &AuthenticatedUser, job_id: &str) -> Result<(Job, ObjectId), AppError> {
        let job = self.job_repo.get(&parse_object_id(job_id, "job_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        ensure_owner_or_admin(job.is_owned_by(&my_id), auth, "채용공고를 수정할 권한이 없습니다")?;
        Ok((job, my_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::jobs::job::JobType;

    #[test]
    fn test_active_filter() {
        let filter = JobFilter {
            job_type: Some(JobType::Remote),
            location: Some("Seoul".to_string()),
            search: Some("rust".to_string()),
        };
        let query = active_filter(&filter);

        assert_eq!(query.get_bool("is_active").unwrap(), true);
        assert_eq!(query.get_str("job_type").unwrap(), "remote");
        assert!(query.get_document("location").is_ok());
        assert_eq!(query.get_array("$or").unwrap().len(), 3);
    }

    #[test]
    fn test_patch_then_salary_check() {
        let mut job = Job::new("Dev".into(), "Acme".into(), "Build".into(), ObjectId::new());
        job.salary_max = Some(100.0);

        apply_patch(&mut job, PatchJobRequest { salary_min: Some(200.0), ..Default::default() });

        assert_eq!(job.title, "Dev");
        assert!(matches!(job.validate_salary(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_replace_defaults_to_active() {
        let mut job = Job::new("Dev".into(), "Acme".into(), "Build".into(), ObjectId::new());
        job.is_active = false;

        apply_replace(&mut job, JobRequest {
            title: " Backend ".to_string(),
            company: "Acme".to_string(),
            description: "Rust".to_string(),
            ..Default::default()
        });

        assert_eq!(job.title, "Backend");
        assert!(job.is_active);
    }
}
