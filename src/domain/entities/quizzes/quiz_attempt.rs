use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::quizzes::quiz::{QuestionOutcome, Quiz, QuizAnswer, ScoreCard};

/// `quiz_attempts` 컬렉션 문서 (제출 한 번)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quiz_id: ObjectId,
    pub user_id: ObjectId,
    pub answers: Vec<QuizAnswer>,
    pub outcomes: Vec<QuestionOutcome>,
    pub score: f64,
    pub total_marks: f64,
    pub correct_count: i64,
    pub wrong_count: i64,
    pub unanswered_count: i64,
    pub submitted_at: DateTime,
}

impl QuizAttempt {
    pub fn grade(quiz: &Quiz, quiz_id: ObjectId, user_id: ObjectId, answers: Vec<QuizAnswer>) -> Self {
        let ScoreCard { score, outcomes, correct_count, wrong_count, unanswered_count } = quiz.score(&answers);

        Self {
            id: None,
            quiz_id,
            user_id,
            answers,
            outcomes,
            score,
            total_marks: quiz.total_marks,
            correct_count,
            wrong_count,
            unanswered_count,
            submitted_at: DateTime::now(),
        }
    }
}
