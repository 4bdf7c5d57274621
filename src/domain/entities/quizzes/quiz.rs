//! 퀴즈 엔티티와 채점 규칙
//!
//! 문항 유형은 두 가지입니다.
//! - `multiple_choice`: 보기 2개 이상, 정답 보기 정확히 1개
//! - `tita` (type in the answer): 자유 입력, 앞뒤 공백 제거 후 대소문자 무시 비교
//!
//! 채점: 정답 +marks, 오답 −negative_marks, 미응답 0. 총점은 음수가 될 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Tita,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 문항 ID (uuid). 응답 제출 시 이 값으로 문항을 가리킵니다.
    pub id: String,
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub marks: f64,
    #[serde(default)]
    pub negative_marks: f64,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// 제출된 응답 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizAnswer {
    pub question_id: String,
    /// 객관식: 선택한 보기 인덱스 (0부터)
    #[serde(default)]
    pub selected_option: Option<usize>,
    /// 주관식 입력값
    #[serde(default)]
    pub text_answer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
    Unanswered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub outcome: Outcome,
    pub awarded: f64,
}

/// 채점 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub outcomes: Vec<QuestionOutcome>,
    pub correct_count: i64,
    pub wrong_count: i64,
    pub unanswered_count: i64,
}

/// `quizzes` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<ObjectId>,
    pub created_by: ObjectId,
    pub questions: Vec<Question>,
    pub total_marks: f64,
    pub total_questions: i64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Question {
    pub fn validate(&self, index: usize) -> Result<(), AppError> {
        let number = index + 1;

        if self.text.trim().is_empty() {
            return Err(invalid(number, "문항 내용은 필수입니다"));
        }
        if !(self.marks > 0.0) {
            return Err(invalid(number, "배점은 0보다 커야 합니다"));
        }
        if self.negative_marks < 0.0 {
            return Err(invalid(number, "감점은 0 이상이어야 합니다"));
        }

        match self.question_type {
            QuestionType::MultipleChoice => {
                if self.options.len() < 2 {
                    return Err(invalid(number, "객관식 문항은 보기가 2개 이상이어야 합니다"));
                }
                if self.options.iter().any(|o| o.text.trim().is_empty()) {
                    return Err(invalid(number, "비어 있는 보기가 있습니다"));
                }
                let correct = self.options.iter().filter(|o| o.is_correct).count();
                if correct != 1 {
                    return Err(invalid(number, "객관식 문항은 정답 보기가 정확히 1개여야 합니다"));
                }
            }
            QuestionType::Tita => {
                let has_answer = self.correct_answer
                    .as_deref()
                    .is_some_and(|answer| !answer.trim().is_empty());
                if !has_answer {
                    return Err(invalid(number, "주관식 문항은 정답이 필요합니다"));
                }
            }
        }

        Ok(())
    }

    /// 응답 하나를 채점합니다. 응답이 없으면 `Unanswered`.
    pub fn grade(&self, answer: Option<&QuizAnswer>) -> QuestionOutcome {
        let outcome = match (self.question_type, answer) {
            (_, None) => Outcome::Unanswered,
            (QuestionType::MultipleChoice, Some(answer)) => match answer.selected_option {
                None => Outcome::Unanswered,
                Some(index) if self.options.get(index).is_some_and(|o| o.is_correct) => Outcome::Correct,
                Some(_) => Outcome::Wrong,
            },
            (QuestionType::Tita, Some(answer)) => {
                let given = answer.text_answer.as_deref().map(str::trim).unwrap_or_default();
                let expected = self.correct_answer.as_deref().map(str::trim).unwrap_or_default();

                if given.is_empty() {
                    Outcome::Unanswered
                } else if given.to_lowercase() == expected.to_lowercase() {
                    Outcome::Correct
                } else {
                    Outcome::Wrong
                }
            }
        };

        let awarded = match outcome {
            Outcome::Correct => self.marks,
            Outcome::Wrong => -self.negative_marks,
            Outcome::Unanswered => 0.0,
        };

        QuestionOutcome {
            question_id: self.id.clone(),
            outcome,
            awarded,
        }
    }
}

fn invalid(number: usize, message: &str) -> AppError {
    AppError::ValidationError(format!("{}번 문항: {}", number, message))
}

impl Quiz {
    pub fn new(title: String, created_by: ObjectId, questions: Vec<Question>) -> Self {
        let now = DateTime::now();
        let mut quiz = Self {
            id: None,
            title,
            description: None,
            course_id: None,
            created_by,
            questions,
            total_marks: 0.0,
            total_questions: 0,
            duration_minutes: None,
            created_at: now,
            updated_at: now,
        };
        quiz.sync_totals();
        quiz
    }

    pub fn sync_totals(&mut self) {
        self.total_marks = self.questions.iter().map(|q| q.marks).sum();
        self.total_questions = self.questions.len() as i64;
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.created_by == user_id
    }

    /// 생성/수정 시 검증
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError("퀴즈 제목은 필수입니다".to_string()));
        }
        if self.questions.is_empty() {
            return Err(AppError::ValidationError("문항이 1개 이상 필요합니다".to_string()));
        }

        self.questions
            .iter()
            .enumerate()
            .try_for_each(|(index, question)| question.validate(index))
    }

    /// 모든 문항을 채점합니다. 같은 문항에 응답이 여러 개면 첫 응답만 사용하고,
    /// 존재하지 않는 문항 ID의 응답은 무시합니다.
    pub fn score(&self, answers: &[QuizAnswer]) -> ScoreCard {
        let outcomes: Vec<QuestionOutcome> = self.questions
            .iter()
            .map(|question| question.grade(answers.iter().find(|a| a.question_id == question.id)))
            .collect();

        let count = |kind: Outcome| outcomes.iter().filter(|o| o.outcome == kind).count() as i64;

        ScoreCard {
            score: outcomes.iter().map(|o| o.awarded).sum(),
            correct_count: count(Outcome::Correct),
            wrong_count: count(Outcome::Wrong),
            unanswered_count: count(Outcome::Unanswered),
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(id: &str, correct_index: usize, marks: f64, negative: f64) -> Question {
        Question {
            id: id.to_string(),
            question_type: QuestionType::MultipleChoice,
            text: "2 + 2 = ?".to_string(),
            options: ["3", "4", "5"]
                .iter()
                .enumerate()
                .map(|(i, text)| QuizOption { text: text.to_string(), is_correct: i == correct_index })
                .collect(),
            correct_answer: None,
            marks,
            negative_marks: negative,
            explanation: None,
        }
    }

    fn tita(id: &str, answer: &str) -> Question {
        Question {
            id: id.to_string(),
            question_type: QuestionType::Tita,
            text: "Rust의 패키지 매니저는?".to_string(),
            options: Vec::new(),
            correct_answer: Some(answer.to_string()),
            marks: 2.0,
            negative_marks: 0.5,
            explanation: None,
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz::new("중간 점검".to_string(), ObjectId::new(), questions)
    }

    fn choose(question_id: &str, index: usize) -> QuizAnswer {
        QuizAnswer { question_id: question_id.to_string(), selected_option: Some(index), text_answer: None }
    }

    fn type_in(question_id: &str, text: &str) -> QuizAnswer {
        QuizAnswer { question_id: question_id.to_string(), selected_option: None, text_answer: Some(text.to_string()) }
    }

    #[test]
    fn test_totals() {
        let quiz = quiz(vec![mc("q1", 1, 4.0, 1.0), tita("q2", "cargo")]);

        assert_eq!(quiz.total_marks, 6.0);
        assert_eq!(quiz.total_questions, 2);
    }

    #[test]
    fn test_validation_rules() {
        assert!(quiz(vec![mc("q1", 1, 1.0, 0.0)]).validate().is_ok());
        assert!(quiz(vec![]).validate().is_err());

        let mut untitled = quiz(vec![mc("q1", 1, 1.0, 0.0)]);
        untitled.title = "  ".to_string();
        assert!(untitled.validate().is_err());

        let mut one_option = mc("q1", 0, 1.0, 0.0);
        one_option.options.truncate(1);
        assert!(quiz(vec![one_option]).validate().is_err());

        let mut two_correct = mc("q1", 0, 1.0, 0.0);
        two_correct.options[1].is_correct = true;
        assert!(quiz(vec![two_correct]).validate().is_err());

        let mut no_correct = mc("q1", 0, 1.0, 0.0);
        no_correct.options[0].is_correct = false;
        assert!(quiz(vec![no_correct]).validate().is_err());

        assert!(quiz(vec![tita("q1", "   ")]).validate().is_err());

        let mut zero_marks = tita("q1", "cargo");
        zero_marks.marks = 0.0;
        assert!(quiz(vec![zero_marks]).validate().is_err());

        let mut negative_penalty = tita("q1", "cargo");
        negative_penalty.negative_marks = -1.0;
        assert!(quiz(vec![negative_penalty]).validate().is_err());
    }

    #[test]
    fn test_validation_error_names_question() {
        let err = quiz(vec![mc("q1", 1, 1.0, 0.0), tita("q2", "")]).validate().unwrap_err();
        assert!(err.to_string().contains("2번 문항"));
    }

    #[test]
    fn test_scoring_marks_and_negative_marks() {
        let quiz = quiz(vec![
            mc("q1", 1, 4.0, 1.0),
            mc("q2", 0, 4.0, 1.0),
            tita("q3", "Cargo"),
            tita("q4", "rustc"),
        ]);

        let card = quiz.score(&[
            choose("q1", 1),
            choose("q2", 2),
            type_in("q3", "  cargo "),
        ]);

        assert_eq!(card.score, 4.0 - 1.0 + 2.0);
        assert_eq!(card.correct_count, 2);
        assert_eq!(card.wrong_count, 1);
        assert_eq!(card.unanswered_count, 1);
        assert_eq!(card.outcomes[3].outcome, Outcome::Unanswered);
        assert_eq!(card.outcomes[3].awarded, 0.0);
    }

    #[test]
    fn test_score_can_be_negative() {
        let quiz = quiz(vec![mc("q1", 1, 1.0, 2.0)]);
        let card = quiz.score(&[choose("q1", 0)]);

        assert_eq!(card.score, -2.0);
    }

    #[test]
    fn test_blank_and_out_of_range_answers() {
        let quiz = quiz(vec![mc("q1", 1, 1.0, 1.0), tita("q2", "cargo")]);
        let card = quiz.score(&[choose("q1", 9), type_in("q2", "   "), choose("unknown", 0)]);

        assert_eq!(card.outcomes[0].outcome, Outcome::Wrong);
        assert_eq!(card.outcomes[1].outcome, Outcome::Unanswered);
        assert_eq!(card.score, -1.0);
    }

    #[test]
    fn test_first_answer_wins() {
        let quiz = quiz(vec![mc("q1", 1, 1.0, 0.0)]);
        let card = quiz.score(&[choose("q1", 1), choose("q1", 0)]);

        assert_eq!(card.correct_count, 1);
    }
}
