//! # 1:1 메시지 서비스
//!
//! 대화 스레드를 열면 상대가 보낸 안 읽은 메시지를 읽음 처리합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::social::{ConversationResponse, DirectMessageResponse, SendMessageRequest, UnreadCountResponse};
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::social::message::Message;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::social::message_repo::MessageRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};

#[service(name = "message")]
pub struct MessageService {
    message_repo: Arc<MessageRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

impl MessageService {
    /// # Errors
    ///
    /// * `ValidationError` - 자기 자신에게 보냄
    /// * `NotFound` - 받는 사람 없음
    pub async fn send(&self, auth: &AuthenticatedUser, request: SendMessageRequest) -> Result<DirectMessageResponse, AppError> {
        let recipient_id = parse_object_id(&request.recipient_id, "recipient_id")?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if recipient_id == my_id {
            return Err(AppError::ValidationError("자기 자신에게 메시지를 보낼 수 없습니다".to_string()));
        }
        if self.user_repo.find_by_id(&recipient_id).await?.is_none() {
            return Err(AppError::NotFound("받는 사용자를 찾을 수 없습니다".to_string()));
        }

        let message = Message::new(my_id, recipient_id, request.content.trim().to_string());
        let created = self.message_repo.create(message).await?;

        self.activity_service.record(my_id, "message.send", "user", Some(recipient_id)).await;
        Ok(DirectMessageResponse::from(created))
    }

    /// 대화 목록 (최근 메시지순)
    pub async fn conversations(&self, auth: &AuthenticatedUser) -> Result<Vec<ConversationResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let rows = self.message_repo.conversations(&require_id(&me.id)?).await?;

        let counterpart_ids: Vec<_> = rows.iter().map(|row| row.counterpart_id).collect();
        let users = self.user_repo.find_by_ids(&counterpart_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| ConversationResponse {
                user_id: row.counterpart_id.to_hex(),
                user: users
                    .iter()
                    .find(|user| user.id.as_ref() == Some(&row.counterpart_id))
                    .map(UserSummary::from),
                last_message: DirectMessageResponse::from(row.last_message),
                unread_count: row.unread_count,
            })
            .collect())
    }

    /// 특정 사용자와의 대화 (오래된 순). 받은 메시지를 읽음 처리합니다.
    pub async fn thread(&self, auth: &AuthenticatedUser, other_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<DirectMessageResponse>, AppError> {
        let other_id = parse_object_id(other_id, "user_id")?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let marked = self.message_repo.mark_read(&other_id, &my_id).await?;
        if marked > 0 {
            log::debug!("메시지 읽음 처리: {}건", marked);
        }

        let messages = self.message_repo.thread(&my_id, &other_id, page).await?;
        Ok(messages.map(DirectMessageResponse::from))
    }

    pub async fn unread_count(&self, auth: &AuthenticatedUser) -> Result<UnreadCountResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let unread_count = self.message_repo.unread_count(&require_id(&me.id)?).await?;
        Ok(UnreadCountResponse { unread_count })
    }
}
