//! # 강좌 리포지토리
//!
//! `courses` 컬렉션 데이터 액세스 계층입니다.
//! 강좌 상세는 수강신청, 장바구니, 리뷰 작성 때마다 조회되므로 ID 조회 결과를
//! Redis에 캐싱하고 저장/삭제 시 무효화합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::courses::course::Course,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{aggregate_all, contains_ignore_case, find_all, find_page, inserted_object_id, number_field};

#[repository(name = "course", collection = "courses")]
pub struct CourseRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 전체 강좌 합계 (관리자 통계)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseTotals {
    pub enrollments: i64,
    pub revenue: f64,
}

impl CourseRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Course>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Some(cached) = self.redis.get_cached::<Course>(&cache_key).await {
            return Ok(Some(cached));
        }

        let course = self.collection::<Course>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        if let Some(ref course) = course {
            self.redis.cache(&cache_key, course).await;
        }

        Ok(course)
    }

    /// 없으면 404
    pub async fn get(&self, id: &ObjectId) -> Result<Course, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("강좌를 찾을 수 없습니다".to_string()))
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Course>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        find_all(&self.collection::<Course>(), doc! { "_id": { "$in": ids.to_vec() } }, doc! { "title": 1 }, None).await
    }

    pub async fn create(&self, mut course: Course) -> Result<Course, AppError> {
        let result = self.collection::<Course>()
            .insert_one(&course)
            .await
            .map_err(db_error)?;

        course.id = Some(inserted_object_id(&result)?);
        Ok(course)
    }

    /// 문서 전체를 덮어씁니다. (마지막 쓰기 우선)
    pub async fn save(&self, course: &Course) -> Result<(), AppError> {
        let id = course.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 강좌입니다".to_string()))?;

        self.collection::<Course>()
            .replace_one(doc! { "_id": id }, course)
            .await
            .map_err(db_error)?;

        let _ = self.invalidate_cache(&id.to_hex()).await;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Course>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        let _ = self.invalidate_cache(&id.to_hex()).await;
        Ok(result.deleted_count > 0)
    }

    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Course>, AppError> {
        find_page(&self.collection::<Course>(), filter, doc! { "created_at": -1 }, page).await
    }

    /// 공개된 강좌 중 제목/설명/태그 부분 일치
    pub async fn search_published(&self, term: &str, limit: i64) -> Result<Vec<Course>, AppError> {
        let pattern = contains_ignore_case(term);
        let filter = doc! {
            "is_published": true,
            "$or": [
                { "title": pattern.clone() },
                { "description": pattern.clone() },
                { "tags": pattern },
            ]
        };

        find_all(&self.collection::<Course>(), filter, doc! { "total_students": -1 }, Some(limit)).await
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        self.collection::<Course>()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    /// 수강생 수 합계와 예상 매출(가격 × 수강생 수) 합계
    pub async fn totals(&self) -> Result<CourseTotals, AppError> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": null,
                "enrollments": { "$sum": "$total_students" },
                "revenue": { "$sum": { "$multiply": ["$price", "$total_students"] } },
            }
        }];

        let rows = aggregate_all(&self.collection::<Course>(), pipeline).await?;

        Ok(rows
            .first()
            .map(|row| CourseTotals {
                enrollments: number_field(row, "enrollments") as i64,
                revenue: number_field(row, "revenue"),
            })
            .unwrap_or_default())
    }

    pub async fn top_by_students(&self, limit: i64) -> Result<Vec<Course>, AppError> {
        find_all(&self.collection::<Course>(), doc! {}, doc! { "total_students": -1, "rating": -1 }, Some(limit)).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let published_index = IndexModel::builder()
            .keys(doc! { "is_published": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("published_created_at".to_string())
                .build())
            .build();

        let instructor_index = IndexModel::builder()
            .keys(doc! { "instructor_id": 1 })
            .options(IndexOptions::builder()
                .name("instructor_id".to_string())
                .build())
            .build();

        self.collection::<Course>()
            .create_indexes([published_index, instructor_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
