use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::jobs::application::{Application, ApplicationAnswer, ApplicationStatus};
use crate::domain::entities::jobs::job::{CustomQuestion, Job, JobType};
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::{to_utc, to_utc_opt};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: JobType,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub posted_by: String,
    pub custom_questions: Vec<CustomQuestion>,
    pub is_active: bool,
    pub applications_count: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: id_hex(&job.id),
            title: job.title,
            company: job.company,
            description: job.description,
            location: job.location,
            job_type: job.job_type,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            posted_by: job.posted_by.to_hex(),
            custom_questions: job.custom_questions,
            is_active: job.is_active,
            applications_count: job.applications_count,
            deadline: to_utc_opt(job.deadline),
            created_at: to_utc(job.created_at),
            updated_at: to_utc(job.updated_at),
        }
    }
}

/// 지원서 응답
///
/// `confirmation_token`은 지원자 본인에게만 채워집니다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserSummary>,
    pub answers: Vec<ApplicationAnswer>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationResponse {
    pub fn for_applicant(application: Application) -> Self {
        let token = application.confirmation_token.clone();
        let mut response = Self::for_reviewer(application, None);
        response.confirmation_token = Some(token);
        response
    }

    pub fn for_reviewer(application: Application, applicant: Option<UserSummary>) -> Self {
        Self {
            id: id_hex(&application.id),
            job_id: application.job_id.to_hex(),
            applicant_id: application.applicant_id.to_hex(),
            applicant,
            answers: application.answers,
            resume_url: application.resume_url,
            cover_letter: application.cover_letter,
            status: application.status,
            confirmation_token: None,
            created_at: to_utc(application.created_at),
            updated_at: to_utc(application.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_token_only_for_applicant() {
        let application = Application::new(ObjectId::new(), ObjectId::new(), Vec::new());
        let token = application.confirmation_token.clone();

        let mine = ApplicationResponse::for_applicant(application.clone());
        assert_eq!(mine.confirmation_token, Some(token));

        let reviewed = ApplicationResponse::for_reviewer(application, None);
        let json = serde_json::to_value(&reviewed).unwrap();
        assert!(json.get("confirmation_token").is_none());
    }
}
