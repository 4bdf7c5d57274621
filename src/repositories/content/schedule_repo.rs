use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::content::schedule::Schedule,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::repositories::common::{find_all, inserted_object_id};

#[repository(name = "schedule", collection = "schedules")]
pub struct ScheduleRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 시작 시각 범위 조건
fn start_time_range(user_id: &ObjectId, from: Option<DateTime>, to: Option<DateTime>) -> Document {
    let mut filter = doc! { "user_id": *user_id };
    let mut range = Document::new();

    if let Some(from) = from {
        range.insert("$gte", from);
    }
    if let Some(to) = to {
        range.insert("$lte", to);
    }
    if !range.is_empty() {
        filter.insert("start_time", range);
    }

    filter
}

impl ScheduleRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Schedule>, AppError> {
        self.collection::<Schedule>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut schedule: Schedule) -> Result<Schedule, AppError> {
        let result = self.collection::<Schedule>()
            .insert_one(&schedule)
            .await
            .map_err(db_error)?;

        schedule.id = Some(inserted_object_id(&result)?);
        Ok(schedule)
    }

    pub async fn save(&self, schedule: &Schedule) -> Result<(), AppError> {
        let id = schedule.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 일정입니다".to_string()))?;

        self.collection::<Schedule>()
            .replace_one(doc! { "_id": id }, schedule)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Schedule>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    /// 시작 시각 오름차순
    pub async fn list_by_user(&self, user_id: &ObjectId, from: Option<DateTime>, to: Option<DateTime>) -> Result<Vec<Schedule>, AppError> {
        find_all(
            &self.collection::<Schedule>(),
            start_time_range(user_id, from, to),
            doc! { "start_time": 1 },
            None,
        ).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "start_time": 1 })
            .options(IndexOptions::builder()
                .name("user_start_time".to_string())
                .build())
            .build();

        self.collection::<Schedule>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_omitted_without_bounds() {
        let user_id = ObjectId::new();
        let filter = start_time_range(&user_id, None, None);

        assert!(!filter.contains_key("start_time"));
        assert_eq!(filter.get_object_id("user_id").unwrap(), user_id);
    }

    #[test]
    fn test_range_includes_given_bounds() {
        let from = DateTime::from_millis(1_000);
        let filter = start_time_range(&ObjectId::new(), Some(from), None);
        let range = filter.get_document("start_time").unwrap();

        assert_eq!(range.get_datetime("$gte").unwrap(), &from);
        assert!(!range.contains_key("$lte"));
    }
}
