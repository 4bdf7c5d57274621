//! # 지원서 서비스
//!
//! ```text
//! 지원 ─► pending ─► reviewed ─► accepted | rejected
//!   │
//!   └── 지원자 철회 (DELETE) → 공고 applications_count 1 감소 (0 미만 불가)
//! ```
//!
//! 확인 토큰은 지원자 본인 응답에만 포함됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::jobs::{ApplicationResponse, ApplyRequest, UpdateStatusRequest};
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::jobs::application::Application;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::jobs::application_repo::ApplicationRepository;
use crate::repositories::jobs::job_repo::JobRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "application")]
pub struct ApplicationService {
    application_repo: Arc<ApplicationRepository>,
    job_repo: Arc<JobRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

impl ApplicationService {
    /// 지원서 제출
    ///
    /// # Errors
    ///
    /// * `NotFound` - 공고 없음
    /// * `ValidationError` - 마감/비활성 공고, 본인 공고, 중복 지원, 추가 질문 응답 오류
    pub async fn apply(&self, auth: &AuthenticatedUser, request: ApplyRequest) -> Result<ApplicationResponse, AppError> {
        let job_id = parse_object_id(&request.job_id, "job_id")?;
        let mut job = self.job_repo.get(&job_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let existing = self.application_repo.find_by_job_and_applicant(&job_id, &my_id).await?;
        job.ensure_can_apply(&my_id, existing.as_ref(), DateTime::now())?;

        job.validate_answers(&request.answers)?;

        let mut application = Application::new(job_id, my_id, request.answers);
        application.resume_url = clean_optional_string(request.resume_url);
        application.cover_letter = clean_optional_string(request.cover_letter);

        let created = self.application_repo.create(application).await?;

        job.increment_applications();
        job.touch();
        self.job_repo.save(&job).await?;

        log::info!("📨 지원 접수: {} → {}", me.username, job.title);
        self.activity_service.record(my_id, "application.create", "job", Some(job_id)).await;

        Ok(ApplicationResponse::for_applicant(created))
    }

    /// 내 지원서 목록
    pub async fn mine(&self, auth: &AuthenticatedUser, page: &PaginationQuery) -> Result<PaginatedResponse<ApplicationResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let applications = self.application_repo
            .list(doc! { "applicant_id": require_id(&me.id)? }, page)
            .await?;

        Ok(applications.map(ApplicationResponse::for_applicant))
    }

    /// 지원서 상세 (지원자 또는 공고 작성자)
    pub async fn get(&self, auth: &AuthenticatedUser, application_id: &str) -> Result<ApplicationResponse, AppError> {
        let application = self.application_repo.get(&parse_object_id(application_id, "application_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if application.applicant_id == my_id {
            return Ok(ApplicationResponse::for_applicant(application));
        }

        let job = self.job_repo.get(&application.job_id).await?;
        ensure_owner_or_admin(job.is_owned_by(&my_id), auth, "지원서를 볼 권한이 없습니다")?;

        let applicant = self.user_repo.find_by_id(&application.applicant_id).await?;
        Ok(ApplicationResponse::for_reviewer(application, applicant.as_ref().map(UserSummary::from)))
    }

    /// 공고의 지원서 목록 (작성자 또는 관리자)
    pub async fn list_for_job(&self, auth: &AuthenticatedUser, job_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<ApplicationResponse>, AppError> {
        let job_id = parse_object_id(job_id, "job_id")?;
        let job = self.job_repo.get(&job_id).await?;
        let my_id = self.caller_id(auth).await?;

        ensure_owner_or_admin(job.is_owned_by(&my_id), auth, "지원서를 볼 권한이 없습니다")?;

        let applications = self.application_repo.list(doc! { "job_id": job_id }, page).await?;
        let applicant_ids: Vec<ObjectId> = applications.items.iter().map(|a| a.applicant_id).collect();
        let applicants = self.user_repo.find_by_ids(&applicant_ids).await?;

        Ok(applications.map(|application| {
            let applicant = applicants
                .iter()
                .find(|user| user.id.as_ref() == Some(&application.applicant_id))
                .map(UserSummary::from);
            ApplicationResponse::for_reviewer(application, applicant)
        }))
    }

    /// 상태 변경 (공고 작성자 또는 관리자)
    pub async fn update_status(&self, auth: &AuthenticatedUser, application_id: &str, request: UpdateStatusRequest) -> Result<ApplicationResponse, AppError> {
        let mut application = self.application_repo.get(&parse_object_id(application_id, "application_id")?).await?;
        let job = self.job_repo.get(&application.job_id).await?;
        let my_id = self.caller_id(auth).await?;

        ensure_owner_or_admin(job.is_owned_by(&my_id), auth, "지원서 상태를 바꿀 권한이 없습니다")?;

        application.status = request.status;
        application.updated_at = DateTime::now();
        self.application_repo.save(&application).await?;

        self.activity_service
            .record_with(my_id, "application.status", "application", application.id, doc! { "status": request.status.as_str() })
            .await;

        let applicant = self.user_repo.find_by_id(&application.applicant_id).await?;
        Ok(ApplicationResponse::for_reviewer(application, applicant.as_ref().map(UserSummary::from)))
    }

    /// 지원 철회 (지원자 본인)
    pub async fn withdraw(&self, auth: &AuthenticatedUser, application_id: &str) -> Result<(), AppError> {
        let application_id = parse_object_id(application_id, "application_id")?;
        let application = self.application_repo.get(&application_id).await?;
        let my_id = self.caller_id(auth).await?;

        if application.applicant_id != my_id {
            return Err(AppError::AuthorizationError("본인의 지원서만 철회할 수 있습니다".to_string()));
        }

        self.application_repo.delete(&application_id).await?;

        if let Some(mut job) = self.job_repo.find_by_id(&application.job_id).await? {
            job.decrement_applications();
            job.touch();
            self.job_repo.save(&job).await?;
        }

        self.activity_service.record(my_id, "application.withdraw", "job", Some(application.job_id)).await;
        Ok(())
    }

    async fn caller_id(&self, auth: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        require_id(&me.id)
    }
}
