use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use crate::domain::entities::jobs::application::{ApplicationAnswer, ApplicationStatus};
use crate::domain::entities::jobs::job::{CustomQuestion, JobType};
use crate::utils::string_utils::not_blank;

/// 추가 질문 입력. ID는 서버가 발급하며, 수정 시 기존 ID를 넘기면 유지됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomQuestionRequest {
    pub id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 500, message = "질문은 500자 이하여야 합니다"))]
    pub question: String,
    #[serde(default)]
    pub required: bool,
}

impl From<CustomQuestionRequest> for CustomQuestion {
    fn from(request: CustomQuestionRequest) -> Self {
        Self {
            id: request.id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            question: request.question.trim().to_string(),
            required: request.required,
        }
    }
}

/// 채용공고 생성 / 전체 수정(PUT) 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct JobRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 200, message = "회사명은 200자 이하여야 합니다"))]
    pub company: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 20000, message = "설명은 20000자 이하여야 합니다"))]
    pub description: String,

    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,

    #[validate(nested)]
    #[serde(default)]
    pub custom_questions: Vec<CustomQuestionRequest>,

    pub is_active: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
}

/// 채용공고 부분 수정(PATCH) 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatchJobRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub company: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[validate(nested)]
    pub custom_questions: Option<Vec<CustomQuestionRequest>>,
    pub is_active: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
}

/// `GET /api/jobs` 필터
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    /// 근무지 부분 일치
    pub location: Option<String>,
    /// 제목/회사/설명 부분 일치
    pub search: Option<String>,
}

/// 지원서 제출
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApplyRequest {
    pub job_id: String,
    #[serde(default)]
    pub answers: Vec<ApplicationAnswer>,
    #[validate(url(message = "유효한 이력서 URL이 아닙니다"))]
    pub resume_url: Option<String>,
    #[validate(length(max = 5000, message = "자기소개서는 5000자 이하여야 합니다"))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let request: JobRequest = serde_json::from_str(
            r#"{ "title": "Backend Engineer", "company": "" , "description": "Rust" }"#
        ).unwrap();
        assert!(request.validate().is_err());

        let request: JobRequest = serde_json::from_str(
            r#"{ "title": "Backend Engineer", "company": "LearnHub", "description": "Rust", "job_type": "part_time" }"#
        ).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.job_type, Some(JobType::PartTime));
    }

    #[test]
    fn test_custom_question_gets_id() {
        let question = CustomQuestion::from(CustomQuestionRequest {
            id: None,
            question: "  포트폴리오 링크  ".to_string(),
            required: true,
        });

        assert!(!question.id.is_empty());
        assert_eq!(question.question, "포트폴리오 링크");
    }

    #[test]
    fn test_status_parses_snake_case() {
        let request: UpdateStatusRequest = serde_json::from_str(r#"{ "status": "accepted" }"#).unwrap();
        assert_eq!(request.status, ApplicationStatus::Accepted);
        assert!(serde_json::from_str::<UpdateStatusRequest>(r#"{ "status": "hired" }"#).is_err());
    }
}
