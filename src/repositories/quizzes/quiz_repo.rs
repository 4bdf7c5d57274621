use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::quizzes::quiz::Quiz,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{find_page, inserted_object_id};

#[repository(name = "quiz", collection = "quizzes")]
pub struct QuizRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl QuizRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Quiz>, AppError> {
        self.collection::<Quiz>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<Quiz, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("퀴즈를 찾을 수 없습니다".to_string()))
    }

    pub async fn create(&self, mut quiz: Quiz) -> Result<Quiz, AppError> {
        let result = self.collection::<Quiz>()
            .insert_one(&quiz)
            .await
            .map_err(db_error)?;

        quiz.id = Some(inserted_object_id(&result)?);
        Ok(quiz)
    }

    pub async fn save(&self, quiz: &Quiz) -> Result<(), AppError> {
        let id = quiz.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 퀴즈입니다".to_string()))?;

        self.collection::<Quiz>()
            .replace_one(doc! { "_id": id }, quiz)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Quiz>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Quiz>, AppError> {
        find_page(&self.collection::<Quiz>(), filter, doc! { "created_at": -1 }, page).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("course_created_at".to_string())
                .build())
            .build();

        self.collection::<Quiz>()
            .create_indexes([course_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
