use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use crate::utils::string_utils::not_blank;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublicationRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 300, message = "제목은 300자 이하여야 합니다"))]
    pub title: String,

    #[validate(length(max = 10000, message = "초록은 10000자 이하여야 합니다"))]
    pub abstract_text: Option<String>,

    #[validate(url(message = "유효한 URL이 아닙니다"))]
    pub url: Option<String>,

    pub venue: Option<String>,

    #[serde(default)]
    pub co_authors: Vec<String>,

    pub published_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicationFilter {
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduleRequest {
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
}

/// `GET /api/schedules?from=&to=` (RFC 3339)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilter {
    /// 이 시각 이후에 시작하는 일정
    pub from: Option<DateTime<Utc>>,
    /// 이 시각 이전에 시작하는 일정
    pub to: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_title_required() {
        assert!(PublicationRequest::default().validate().is_err());

        let request = PublicationRequest { title: "Ownership Types".to_string(), ..Default::default() };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_schedule_times_parse_rfc3339() {
        let request: ScheduleRequest = serde_json::from_str(r#"{
            "title": "스터디",
            "start_time": "2026-03-01T10:00:00Z",
            "end_time": "2026-03-01T12:00:00Z"
        }"#).unwrap();

        assert!(request.end_time > request.start_time);
        assert!(request.validate().is_ok());
    }
}
