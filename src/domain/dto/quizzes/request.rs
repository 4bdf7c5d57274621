use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use crate::domain::entities::quizzes::quiz::{Question, QuestionType, QuizAnswer, QuizOption};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionRequest {
    /// 수정 시 기존 문항 ID를 유지하려면 전달합니다. 생략하면 새로 발급합니다.
    pub id: Option<String>,
    pub question_type: QuestionType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub marks: f64,
    #[serde(default)]
    pub negative_marks: f64,
    pub explanation: Option<String>,
}

impl From<QuestionRequest> for Question {
    fn from(request: QuestionRequest) -> Self {
        Self {
            id: request.id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            question_type: request.question_type,
            text: request.text,
            options: request.options,
            correct_answer: request.correct_answer,
            marks: request.marks,
            negative_marks: request.negative_marks,
            explanation: request.explanation,
        }
    }
}

/// 퀴즈 생성 / 수정 요청
///
/// 문항 규칙 검증은 엔티티(`Quiz::validate`)가 담당합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuizRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
    #[validate(range(min = 1, max = 600, message = "제한 시간은 1-600분 사이여야 합니다"))]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuizFilter {
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_generated_when_absent() {
        let request: QuestionRequest = serde_json::from_str(
            r#"{ "question_type": "tita", "text": "1+1?", "correct_answer": "2", "marks": 1 }"#
        ).unwrap();

        let question = Question::from(request);
        assert_eq!(question.id.len(), 36);
        assert_eq!(question.negative_marks, 0.0);
    }

    #[test]
    fn test_question_id_kept_when_present() {
        let request: QuestionRequest = serde_json::from_str(
            r#"{ "id": "q-1", "question_type": "multiple_choice", "text": "?", "marks": 1 }"#
        ).unwrap();

        assert_eq!(Question::from(request).id, "q-1");
    }
}
