//! 1:1 메시지 리포지토리
//!
//! 대화 목록은 별도 컬렉션 없이 `messages`를 상대방 기준으로 그룹핑해 만듭니다.

use std::sync::Arc;
use mongodb::{bson::{self, doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::social::message::Message,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{aggregate_all, find_page, inserted_object_id, number_field};

#[repository(name = "message", collection = "messages")]
pub struct MessageRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 상대방별 최신 메시지와 안 읽은 수
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRow {
    pub counterpart_id: ObjectId,
    pub last_message: Message,
    pub unread_count: i64,
}

fn between(a: &ObjectId, b: &ObjectId) -> Document {
    doc! {
        "$or": [
            { "sender_id": *a, "recipient_id": *b },
            { "sender_id": *b, "recipient_id": *a },
        ]
    }
}

fn conversation_pipeline(me: &ObjectId) -> Vec<Document> {
    vec![
        doc! { "$match": { "$or": [ { "sender_id": *me }, { "recipient_id": *me } ] } },
        doc! { "$sort": { "created_at": -1 } },
        doc! {
            "$group": {
                "_id": { "$cond": [ { "$eq": ["$sender_id", *me] }, "$recipient_id", "$sender_id" ] },
                "last_message": { "$first": "$$ROOT" },
                "unread_count": {
                    "$sum": {
                        "$cond": [
                            { "$and": [ { "$eq": ["$recipient_id", *me] }, { "$eq": ["$read", false] } ] },
                            1,
                            0,
                        ]
                    }
                },
            }
        },
        doc! { "$sort": { "last_message.created_at": -1 } },
    ]
}

impl MessageRepository {
    pub async fn create(&self, mut message: Message) -> Result<Message, AppError> {
        let result = self.collection::<Message>()
            .insert_one(&message)
            .await
            .map_err(db_error)?;

        message.id = Some(inserted_object_id(&result)?);
        Ok(message)
    }

    /// 두 사용자 사이의 대화 (오래된 순)
    pub async fn thread(&self, me: &ObjectId, other: &ObjectId, page: &PaginationQuery) -> Result<PaginatedResponse<Message>, AppError> {
        find_page(&self.collection::<Message>(), between(me, other), doc! { "created_at": 1 }, page).await
    }

    /// `from`이 `to`에게 보낸 안 읽은 메시지를 읽음 처리
    pub async fn mark_read(&self, from: &ObjectId, to: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Message>()
            .update_many(
                doc! { "sender_id": *from, "recipient_id": *to, "read": false },
                doc! { "$set": { "read": true } },
            )
            .await
            .map_err(db_error)?;

        Ok(result.modified_count)
    }

    pub async fn unread_count(&self, me: &ObjectId) -> Result<u64, AppError> {
        self.collection::<Message>()
            .count_documents(doc! { "recipient_id": *me, "read": false })
            .await
            .map_err(db_error)
    }

    pub async fn conversations(&self, me: &ObjectId) -> Result<Vec<ConversationRow>, AppError> {
        let rows = aggregate_all(&self.collection::<Message>(), conversation_pipeline(me)).await?;

        rows.into_iter()
            .map(|row| {
                let counterpart_id = row.get_object_id("_id")
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;
                let last_message = row.get_document("last_message")
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;
                let last_message: Message = bson::from_document(last_message.clone())
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                Ok(ConversationRow {
                    counterpart_id,
                    last_message,
                    unread_count: number_field(&row, "unread_count") as i64,
                })
            })
            .collect()
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "sender_id": 1, "recipient_id": 1, "created_at": 1 })
            .options(IndexOptions::builder()
                .name("pair_created_at".to_string())
                .build())
            .build();

        let unread_index = IndexModel::builder()
            .keys(doc! { "recipient_id": 1, "read": 1 })
            .options(IndexOptions::builder()
                .name("recipient_unread".to_string())
                .build())
            .build();

        self.collection::<Message>()
            .create_indexes([pair_index, unread_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_matches_both_directions() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let filter = between(&a, &b);
        let branches = filter.get_array("$or").unwrap();

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].as_document().unwrap().get_object_id("sender_id").unwrap(), a);
        assert_eq!(branches[1].as_document().unwrap().get_object_id("sender_id").unwrap(), b);
    }

    #[test]
    fn test_conversation_pipeline_groups_by_counterpart() {
        let pipeline = conversation_pipeline(&ObjectId::new());

        assert_eq!(pipeline.len(), 4);
        assert!(pipeline[2].get_document("$group").unwrap().contains_key("unread_count"));
    }
}
