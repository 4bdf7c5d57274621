use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::entities::quizzes::quiz::{Question, QuestionOutcome, QuestionType, Quiz};
use crate::domain::entities::quizzes::quiz_attempt::QuizAttempt;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptionView {
    pub text: String,
    /// 정답 공개 시에만 포함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub id: String,
    pub question_type: QuestionType,
    pub text: String,
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub marks: f64,
    pub negative_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionResponse {
    /// `reveal`이 거짓이면 정답 키와 해설을 제거합니다.
    pub fn new(question: Question, reveal: bool) -> Self {
        Self {
            id: question.id,
            question_type: question.question_type,
            text: question.text,
            options: question.options
                .into_iter()
                .map(|option| OptionView {
                    text: option.text,
                    is_correct: reveal.then_some(option.is_correct),
                })
                .collect(),
            correct_answer: question.correct_answer.filter(|_| reveal),
            marks: question.marks,
            negative_marks: question.negative_marks,
            explanation: question.explanation.filter(|_| reveal),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<String>,
    pub created_by: String,
    pub questions: Vec<QuestionResponse>,
    pub total_marks: f64,
    pub total_questions: i64,
    pub duration_minutes: Option<u32>,
    pub answers_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizResponse {
    pub fn new(quiz: Quiz, reveal: bool) -> Self {
        Self {
            id: id_hex(&quiz.id),
            title: quiz.title,
            description: quiz.description,
            course_id: quiz.course_id.map(|id| id.to_hex()),
            created_by: quiz.created_by.to_hex(),
            questions: quiz.questions
                .into_iter()
                .map(|question| QuestionResponse::new(question, reveal))
                .collect(),
            total_marks: quiz.total_marks,
            total_questions: quiz.total_questions,
            duration_minutes: quiz.duration_minutes,
            answers_visible: reveal,
            created_at: to_utc(quiz.created_at),
            updated_at: to_utc(quiz.updated_at),
        }
    }
}

/// 목록용 요약 (문항 제외)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<String>,
    pub created_by: String,
    pub total_marks: f64,
    pub total_questions: i64,
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: id_hex(&quiz.id),
            title: quiz.title,
            description: quiz.description,
            course_id: quiz.course_id.map(|id| id.to_hex()),
            created_by: quiz.created_by.to_hex(),
            total_marks: quiz.total_marks,
            total_questions: quiz.total_questions,
            duration_minutes: quiz.duration_minutes,
            created_at: to_utc(quiz.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttemptResponse {
    pub id: String,
    pub quiz_id: String,
    pub score: f64,
    pub total_marks: f64,
    pub correct_count: i64,
    pub wrong_count: i64,
    pub unanswered_count: i64,
    pub outcomes: Vec<QuestionOutcome>,
    pub submitted_at: DateTime<Utc>,
}

impl From<QuizAttempt> for AttemptResponse {
    fn from(attempt: QuizAttempt) -> Self {
        Self {
            id: id_hex(&attempt.id),
            quiz_id: attempt.quiz_id.to_hex(),
            score: attempt.score,
            total_marks: attempt.total_marks,
            correct_count: attempt.correct_count,
            wrong_count: attempt.wrong_count,
            unanswered_count: attempt.unanswered_count,
            outcomes: attempt.outcomes,
            submitted_at: to_utc(attempt.submitted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::quizzes::quiz::QuizOption;

    fn question() -> Question {
        Question {
            id: "q1".to_string(),
            question_type: QuestionType::MultipleChoice,
            text: "?".to_string(),
            options: vec![
                QuizOption { text: "a".to_string(), is_correct: true },
                QuizOption { text: "b".to_string(), is_correct: false },
            ],
            correct_answer: None,
            marks: 1.0,
            negative_marks: 0.0,
            explanation: Some("a가 정답".to_string()),
        }
    }

    #[test]
    fn test_answer_keys_hidden() {
        let hidden = QuestionResponse::new(question(), false);
        let json = serde_json::to_value(&hidden).unwrap();

        assert!(json["options"][0].get("is_correct").is_none());
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn test_answer_keys_revealed() {
        let revealed = QuestionResponse::new(question(), true);

        assert_eq!(revealed.options[0].is_correct, Some(true));
        assert_eq!(revealed.explanation.as_deref(), Some("a가 정답"));
    }
}
