use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::quizzes::quiz_attempt::QuizAttempt,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::repositories::common::{find_all, inserted_object_id};

#[repository(name = "quiz_attempt", collection = "quiz_attempts")]
pub struct QuizAttemptRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl QuizAttemptRepository {
    pub async fn create(&self, mut attempt: QuizAttempt) -> Result<QuizAttempt, AppError> {
        let result = self.collection::<QuizAttempt>()
            .insert_one(&attempt)
            .await
            .map_err(db_error)?;

        attempt.id = Some(inserted_object_id(&result)?);
        Ok(attempt)
    }

    /// 내 응시 기록 (최신순)
    pub async fn list_for_user(&self, quiz_id: &ObjectId, user_id: &ObjectId) -> Result<Vec<QuizAttempt>, AppError> {
        find_all(
            &self.collection::<QuizAttempt>(),
            doc! { "quiz_id": *quiz_id, "user_id": *user_id },
            doc! { "submitted_at": -1 },
            None,
        ).await
    }

    pub async fn delete_by_quiz(&self, quiz_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<QuizAttempt>()
            .delete_many(doc! { "quiz_id": *quiz_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "user_id": 1, "submitted_at": -1 })
            .options(IndexOptions::builder()
                .name("quiz_user_submitted_at".to_string())
                .build())
            .build();

        self.collection::<QuizAttempt>()
            .create_indexes([user_quiz_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
