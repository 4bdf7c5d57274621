//! # 퀴즈 서비스
//!
//! 정답 키(보기의 `is_correct`, `correct_answer`, 해설)는 출제자와 관리자에게만
//! 보입니다. 응시자는 제출 결과의 문항별 판정만 받습니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::quizzes::{AttemptResponse, QuizFilter, QuizRequest, QuizResponse, QuizSummary, SubmitAttemptRequest};
use crate::domain::entities::quizzes::quiz::{Question, Quiz};
use crate::domain::entities::quizzes::quiz_attempt::QuizAttempt;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::quizzes::quiz_attempt_repo::QuizAttemptRepository;
use crate::repositories::quizzes::quiz_repo::QuizRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, parse_optional_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "quiz")]
pub struct QuizService {
    quiz_repo: Arc<QuizRepository>,
    quiz_attempt_repo: Arc<QuizAttemptRepository>,
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

fn list_filter(filter: &QuizFilter) -> Result<Document, AppError> {
    let mut query = doc! {};
    if let Some(course_id) = parse_optional_object_id(filter.course_id.as_deref(), "course_id")? {
        query.insert("course_id", course_id);
    }
    Ok(query)
}

/// 요청 내용을 퀴즈에 반영하고 합계를 다시 계산합니다.
fn apply_request(quiz: &mut Quiz, request: QuizRequest, course_id: Option<ObjectId>) {
    quiz.title = request.title.trim().to_string();
    quiz.description = clean_optional_string(request.description);
    quiz.course_id = course_id;
    quiz.questions = request.questions.into_iter().map(Question::from).collect();
    quiz.duration_minutes = request.duration_minutes;
    quiz.sync_totals();
}

impl QuizService {
    pub async fn list(&self, filter: &QuizFilter, page: &PaginationQuery) -> Result<PaginatedResponse<QuizSummary>, AppError> {
        let quizzes = self.quiz_repo.list(list_filter(filter)?, page).await?;
        Ok(quizzes.map(QuizSummary::from))
    }

    /// 퀴즈 상세. 출제자/관리자에게만 정답 키를 포함합니다.
    pub async fn get(&self, auth: &AuthenticatedUser, quiz_id: &str) -> Result<QuizResponse, AppError> {
        let quiz = self.quiz_repo.get(&parse_object_id(quiz_id, "quiz_id")?).await?;

        let reveal = auth.is_admin() || match self.user_repo.find_by_clerk_id(&auth.user_id).await? {
            Some(viewer) => viewer.id.is_some_and(|id| quiz.is_owned_by(&id)),
            None => false,
        };

        Ok(QuizResponse::new(quiz, reveal))
    }

    pub async fn create(&self, auth: &AuthenticatedUser, request: QuizRequest) -> Result<QuizResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;
        let course_id = self.resolve_course(request.course_id.as_deref()).await?;

        let mut quiz = Quiz::new(String::new(), my_id, Vec::new());
        apply_request(&mut quiz, request, course_id);
        quiz.validate()?;

        let created = self.quiz_repo.create(quiz).await?;
        log::info!("📝 퀴즈 생성: {} ({}문항)", created.title, created.total_questions);

        self.activity_service.record(my_id, "quiz.create", "quiz", created.id).await;
        Ok(QuizResponse::new(created, true))
    }

    /// 전체 수정 (출제자 또는 관리자)
    pub async fn update(&self, auth: &AuthenticatedUser, quiz_id: &str, request: QuizRequest) -> Result<QuizResponse, AppError> {
        let (mut quiz, my_id) = self.load_for_write(auth, quiz_id).await?;
        let course_id = self.resolve_course(request.course_id.as_deref()).await?;

        apply_request(&mut quiz, request, course_id);
        quiz.validate()?;
        quiz.touch();
        self.quiz_repo.save(&quiz).await?;

        self.activity_service.record(my_id, "quiz.update", "quiz", quiz.id).await;
        Ok(QuizResponse::new(quiz, true))
    }

    /// 퀴즈와 응시 기록을 삭제합니다.
    pub async fn delete(&self, auth: &AuthenticatedUser, quiz_id: &str) -> Result<(), AppError> {
        let (quiz, my_id) = self.load_for_write(auth, quiz_id).await?;
        let id = require_id(&quiz.id)?;

        self.quiz_repo.delete(&id).await?;
        let removed = self.quiz_attempt_repo.delete_by_quiz(&id).await?;
        log::info!("🗑️ 퀴즈 삭제: {} (응시 {}건)", quiz.title, removed);

        self.activity_service.record(my_id, "quiz.delete", "quiz", Some(id)).await;
        Ok(())
    }

    /// 응답 제출 및 채점
    pub async fn submit_attempt(&self, auth: &AuthenticatedUser, quiz_id: &str, request: SubmitAttemptRequest) -> Result<AttemptResponse, AppError> {
        let quiz_id = parse_object_id(quiz_id, "quiz_id")?;
        let quiz = self.quiz_repo.get(&quiz_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let attempt = QuizAttempt::grade(&quiz, quiz_id, my_id, request.answers);
        let created = self.quiz_attempt_repo.create(attempt).await?;

        log::debug!("퀴즈 채점: {} → {}/{}", me.username, created.score, created.total_marks);
        self.activity_service
            .record_with(my_id, "quiz.attempt", "quiz", Some(quiz_id), doc! { "score": created.score })
            .await;

        Ok(AttemptResponse::from(created))
    }

    /// 내 응시 기록 (최신순)
    pub async fn my_attempts(&self, auth: &AuthenticatedUser, quiz_id: &str) -> Result<Vec<AttemptResponse>, AppError> {
        let quiz_id = parse_object_id(quiz_id, "quiz_id")?;
        self.quiz_repo.get(&quiz_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;

        let attempts = self.quiz_attempt_repo.list_for_user(&quiz_id, &require_id(&me.id)?).await?;
        Ok(attempts.into_iter().map(AttemptResponse::from).collect())
    }

    /// 연결할 강좌가 있으면 존재를 확인합니다.
    async fn resolve_course(&self, course_id: Option<&str>) -> Result<Option<ObjectId>, AppError> {
        match parse_optional_object_id(course_id, "course_id")? {
            Some(id) => {
                self.course_repo.get(&id).await?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    async fn load_for_write(&self, auth: &AuthenticatedUser, quiz_id: &str) -> Result<(Quiz, ObjectId), AppError> {
        let quiz = self.quiz_repo.get(&parse_object_id(quiz_id, "quiz_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        ensure_owner_or_admin(quiz.is_owned_by(&my_id), auth, "퀴즈를 수정할 권한이 없습니다")?;
        Ok((quiz, my_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::quizzes::QuestionRequest;
    use crate::domain::entities::quizzes::quiz::{QuestionType, QuizOption};

    fn tita_request(marks: f64) -> QuestionRequest {
        QuestionRequest {
            id: None,
            question_type: QuestionType::Tita,
            text: "2 + 2 = ?".to_string(),
            options: Vec::new(),
            correct_answer: Some("4".to_string()),
            marks,
            negative_marks: 0.0,
            explanation: None,
        }
    }

    #[test]
    fn test_apply_request_recomputes_totals() {
        let mut quiz = Quiz::new(String::new(), ObjectId::new(), Vec::new());
        let request = QuizRequest {
            title: "  Week 1 ".to_string(),
            questions: vec![tita_request(2.0), tita_request(3.0)],
            ..Default::default()
        };

        apply_request(&mut quiz, request, None);

        assert_eq!(quiz.title, "Week 1");
        assert_eq!(quiz.total_marks, 5.0);
        assert_eq!(quiz.total_questions, 2);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn test_apply_request_then_validate_rejects_bad_choice_question() {
        let mut quiz = Quiz::new(String::new(), ObjectId::new(), Vec::new());
        let request = QuizRequest {
            title: "Week 2".to_string(),
            questions: vec![QuestionRequest {
                question_type: QuestionType::MultipleChoice,
                options: vec![
                    QuizOption { text: "a".to_string(), is_correct: true },
                    QuizOption { text: "b".to_string(), is_correct: true },
                ],
                correct_answer: None,
                ..tita_request(1.0)
            }],
            ..Default::default()
        };

        apply_request(&mut quiz, request, None);
        assert!(matches!(quiz.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_list_filter() {
        assert!(list_filter(&QuizFilter::default()).unwrap().is_empty());

        let course_id = ObjectId::new();
        let filter = QuizFilter { course_id: Some(course_id.to_hex()) };
        assert_eq!(list_filter(&filter).unwrap().get_object_id("course_id").unwrap(), course_id);
    }
}
