use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationAnswer {
    pub question_id: String,
    pub answer: String,
}

/// `applications` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub job_id: ObjectId,
    pub applicant_id: ObjectId,
    #[serde(default)]
    pub answers: Vec<ApplicationAnswer>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    /// 지원 접수 확인용 무작위 토큰
    pub confirmation_token: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Application {
    pub fn new(job_id: ObjectId, applicant_id: ObjectId, answers: Vec<ApplicationAnswer>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            job_id,
            applicant_id,
            answers,
            resume_url: None,
            cover_letter: None,
            status: ApplicationStatus::Pending,
            confirmation_token: uuid::Uuid::new_v4().simple().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_tokens_are_random() {
        let a = Application::new(ObjectId::new(), ObjectId::new(), vec![]);
        let b = Application::new(ObjectId::new(), ObjectId::new(), vec![]);

        assert_eq!(a.confirmation_token.len(), 32);
        assert_ne!(a.confirmation_token, b.confirmation_token);
        assert_eq!(a.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&ApplicationStatus::Accepted).unwrap(), "\"accepted\"");
        let status: ApplicationStatus = serde_json::from_str("\"reviewed\"").unwrap();
        assert_eq!(status.as_str(), "reviewed");
    }
}
