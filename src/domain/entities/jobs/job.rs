//! 채용공고 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::core::errors::AppError;
use crate::domain::entities::jobs::application::{Application, ApplicationAnswer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Remote => "remote",
        }
    }
}

/// 지원서 작성 시 답해야 하는 추가 질문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub required: bool,
}

/// `jobs` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    pub posted_by: ObjectId,
    #[serde(default)]
    pub custom_questions: Vec<CustomQuestion>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub applications_count: i64,
    #[serde(default)]
    pub deadline: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn default_active() -> bool {
    true
}

impl Job {
    pub fn new(title: String, company: String, description: String, posted_by: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            title,
            company,
            description,
            location: None,
            job_type: JobType::default(),
            salary_min: None,
            salary_max: None,
            posted_by,
            custom_questions: Vec::new(),
            is_active: true,
            applications_count: 0,
            deadline: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.posted_by == user_id
    }

    pub fn validate_salary(&self) -> Result<(), AppError> {
        for salary in [self.salary_min, self.salary_max].into_iter().flatten() {
            if salary < 0.0 {
                return Err(AppError::ValidationError("급여는 0 이상이어야 합니다".to_string()));
            }
        }

        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(AppError::ValidationError("최소 급여가 최대 급여보다 클 수 없습니다".to_string()));
            }
        }
        Ok(())
    }

    /// 지원 접수 가능 여부 (마감/비활성)
    pub fn ensure_accepting(&self, now: DateTime) -> Result<(), AppError> {
        if !self.is_active {
            return Err(AppError::ValidationError("마감된 채용공고입니다".to_string()));
        }
        if let Some(deadline) = self.deadline {
            if now > deadline {
                return Err(AppError::ValidationError("지원 기간이 지났습니다".to_string()));
            }
        }
        Ok(())
    }

    /// 지원 가능 여부
    ///
    /// 마감/비활성 공고, 본인 공고, 이미 지원한 공고(`existing`)는 모두 400입니다.
    pub fn ensure_can_apply(
        &self,
        applicant_id: &ObjectId,
        existing: Option<&Application>,
        now: DateTime,
    ) -> Result<(), AppError> {
        self.ensure_accepting(now)?;

        if self.is_owned_by(applicant_id) {
            return Err(AppError::ValidationError("본인이 등록한 공고에는 지원할 수 없습니다".to_string()));
        }
        if existing.is_some() {
            return Err(AppError::ValidationError("이미 지원한 공고입니다".to_string()));
        }
        Ok(())
    }

    /// 추가 질문 응답 검증
    ///
    /// - 필수 질문에 답하지 않았거나 공백만 입력하면 거절
    /// - 존재하지 않는 질문 ID에 대한 응답은 거절
    pub fn validate_answers(&self, answers: &[ApplicationAnswer]) -> Result<(), AppError> {
        if let Some(unknown) = answers
            .iter()
            .find(|a| !self.custom_questions.iter().any(|q| q.id == a.question_id))
        {
            return Err(AppError::ValidationError(format!(
                "존재하지 않는 질문입니다: {}", unknown.question_id
            )));
        }

        for question in self.custom_questions.iter().filter(|q| q.required) {
            let answered = answers
                .iter()
                .any(|a| a.question_id == question.id && !a.answer.trim().is_empty());

            if !answered {
                return Err(AppError::ValidationError(format!(
                    "필수 질문에 답해주세요: {}", question.question
                )));
            }
        }

        Ok(())
    }

    pub fn increment_applications(&mut self) {
        self.applications_count += 1;
    }

    pub fn decrement_applications(&mut self) {
        self.applications_count = (self.applications_count - 1).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        let mut job = Job::new("Backend Engineer".into(), "LearnHub".into(), "Rust".into(), ObjectId::new());
        job.custom_questions = vec![
            CustomQuestion { id: "q1".into(), question: "지원 동기".into(), required: true },
            CustomQuestion { id: "q2".into(), question: "포트폴리오".into(), required: false },
        ];
        job
    }

    fn answer(id: &str, text: &str) -> ApplicationAnswer {
        ApplicationAnswer { question_id: id.to_string(), answer: text.to_string() }
    }

    #[test]
    fn test_second_application_rejected() {
        let job = job();
        let applicant = ObjectId::new();
        let first = Application::new(ObjectId::new(), applicant, Vec::new());

        assert!(job.ensure_can_apply(&applicant, None, DateTime::now()).is_ok());
        assert!(matches!(
            job.ensure_can_apply(&applicant, Some(&first), DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_cannot_apply_to_own_or_closed_job() {
        let mut job = job();
        let poster = job.posted_by;

        assert!(matches!(
            job.ensure_can_apply(&poster, None, DateTime::now()),
            Err(AppError::ValidationError(_))
        ));

        job.is_active = false;
        assert!(matches!(
            job.ensure_can_apply(&ObjectId::new(), None, DateTime::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_required_questions() {
        let job = job();

        assert!(job.validate_answers(&[answer("q1", "성장")]).is_ok());
        assert!(job.validate_answers(&[]).is_err());
        assert!(job.validate_answers(&[answer("q1", "   ")]).is_err());
        assert!(job.validate_answers(&[answer("q2", "링크")]).is_err());
    }

    #[test]
    fn test_unknown_question_rejected() {
        let job = job();
        let result = job.validate_answers(&[answer("q1", "성장"), answer("q9", "?")]);

        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("q9")));
    }

    #[test]
    fn test_closed_or_expired_job() {
        let mut job = job();
        let now = DateTime::now();
        assert!(job.ensure_accepting(now).is_ok());

        job.deadline = Some(DateTime::from_millis(now.timestamp_millis() - 1_000));
        assert!(job.ensure_accepting(now).is_err());

        job.deadline = None;
        job.is_active = false;
        assert!(job.ensure_accepting(now).is_err());
    }

    #[test]
    fn test_salary_range() {
        let mut job = job();
        job.salary_min = Some(5000.0);
        job.salary_max = Some(4000.0);
        assert!(job.validate_salary().is_err());

        job.salary_max = Some(5000.0);
        assert!(job.validate_salary().is_ok());

        job.salary_min = Some(-1.0);
        assert!(job.validate_salary().is_err());
    }

    #[test]
    fn test_applications_count_floors_at_zero() {
        let mut job = job();
        job.decrement_applications();
        assert_eq!(job.applications_count, 0);

        job.increment_applications();
        job.increment_applications();
        job.decrement_applications();
        assert_eq!(job.applications_count, 1);
    }
}
