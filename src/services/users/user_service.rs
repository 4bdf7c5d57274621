//! # 사용자 프로필 서비스
//!
//! 인증은 Clerk가 담당하므로 이 서비스는 계정이 아니라 **프로필**을 다룹니다.
//! Clerk 가입 직후 클라이언트가 `POST /api/users`로 프로필을 한 번 만들고,
//! 이후 모든 도메인 문서는 Clerk ID가 아닌 로컬 `User` ObjectId를 참조합니다.
//!
//! ## 팔로우 관계
//!
//! ```text
//!   alice.following ──► bob
//!   bob.followers   ──► alice
//! ```
//!
//! 팔로우/언팔로우는 두 문서를 모두 수정하고 각각 저장합니다.
//! 카운트 필드는 엔티티 메서드가 배열 길이와 맞춰 둡니다.

use std::sync::Arc;
use mongodb::bson::doc;
use singleton_macro::service;
use crate::{
    domain::{
        entities::users::user::User,
        dto::users::{
            CreateProfileRequest, UpdateProfileRequest,
            ProfileResponse, UserResponse, UserSummary, FollowResponse,
        },
    },
    repositories::{
        courses::course_repo::CourseRepository,
        users::user_repo::UserRepository,
    },
    core::errors::AppError,
};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::courses::CourseSummary;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::access::page_ids;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

/// 사용자 프로필 / 팔로우 / 내 강좌 비즈니스 로직
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    course_repo: Arc<CourseRepository>,
    activity_service: Arc<ActivityService>,
}

impl UserService {
    /// 내 프로필 생성
    ///
    /// 요청에 이메일이 없으면 세션 토큰의 이메일을 사용합니다. 둘 다 없으면 400.
    /// 역할은 토큰의 역할을 그대로 복사합니다.
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이미 프로필이 있거나 사용자명이 사용 중
    pub async fn create_profile(&self, auth: &AuthenticatedUser, request: CreateProfileRequest) -> Result<ProfileResponse, AppError> {
        let email = request.email
            .or_else(|| auth.email.clone())
            .ok_or_else(|| AppError::ValidationError("이메일이 필요합니다".to_string()))?;

        let mut user = User::new(
            auth.user_id.clone(),
            email,
            request.username,
            request.display_name.trim().to_string(),
        );
        user.bio = clean_optional_string(request.bio);
        user.avatar_url = clean_optional_string(request.avatar_url);
        user.roles = auth.roles.clone();

        let created = self.user_repo.create(user).await?;
        log::info!("👤 프로필 생성: {} ({})", created.username, created.clerk_id);

        self.activity_service
            .record(require_id(&created.id)?, "profile.create", "user", created.id)
            .await;

        Ok(ProfileResponse::from(created))
    }

    pub async fn get_me(&self, auth: &AuthenticatedUser) -> Result<ProfileResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        Ok(ProfileResponse::from(me))
    }

    /// 내 프로필 부분 수정. 보낸 필드만 바뀝니다.
    pub async fn update_me(&self, auth: &AuthenticatedUser, request: UpdateProfileRequest) -> Result<ProfileResponse, AppError> {
        let mut me = self.user_repo.find_profile(&auth.user_id).await?;

        if let Some(username) = request.username {
            if username != me.username {
                if self.user_repo.find_by_username(&username).await?.is_some() {
                    return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
                }
                me.username = username;
            }
        }
        if let Some(display_name) = request.display_name {
            me.display_name = display_name.trim().to_string();
        }
        if request.bio.is_some() {
            me.bio = clean_optional_string(request.bio);
        }
        if request.avatar_url.is_some() {
            me.avatar_url = clean_optional_string(request.avatar_url);
        }

        me.touch();
        self.user_repo.save(&me).await?;

        Ok(ProfileResponse::from(me))
    }

    /// 공개 프로필
    pub async fn get_public(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let id = parse_object_id(user_id, "user_id")?;
        let user = self.user_repo.find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 팔로우
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 자기 자신
    /// * `NotFound` - 대상 사용자 없음
    /// * `ConflictError` - 이미 팔로우 중
    pub async fn follow(&self, auth: &AuthenticatedUser, target_id: &str) -> Result<FollowResponse, AppError> {
        let target_id = parse_object_id(target_id, "user_id")?;
        let mut me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if my_id == target_id {
            return Err(AppError::ValidationError("자기 자신을 팔로우할 수 없습니다".to_string()));
        }

        let mut target = self.user_repo.find_by_id(&target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if !me.follow(target_id) {
            return Err(AppError::ConflictError("이미 팔로우 중인 사용자입니다".to_string()));
        }
        target.add_follower(my_id);

        me.touch();
        target.touch();
        self.user_repo.save(&me).await?;
        self.user_repo.save(&target).await?;

        self.activity_service.record(my_id, "user.follow", "user", Some(target_id)).await;

        Ok(FollowResponse {
            following: true,
            followers_count: target.followers_count,
            following_count: me.following_count,
        })
    }

    /// 언팔로우. 팔로우 중이 아니면 400.
    pub async fn unfollow(&self, auth: &AuthenticatedUser, target_id: &str) -> Result<FollowResponse, AppError> {
        let target_id = parse_object_id(target_id, "user_id")?;
        let mut me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if !me.unfollow(&target_id) {
            return Err(AppError::ValidationError("팔로우 중인 사용자가 아닙니다".to_string()));
        }
        me.touch();
        self.user_repo.save(&me).await?;

        // 대상이 이미 삭제됐어도 내 쪽 관계는 정리합니다.
        let followers_count = match self.user_repo.find_by_id(&target_id).await? {
            Some(mut target) => {
                target.remove_follower(&my_id);
                target.touch();
                self.user_repo.save(&target).await?;
                target.followers_count
            }
            None => 0,
        };

        self.activity_service.record(my_id, "user.unfollow", "user", Some(target_id)).await;

        Ok(FollowResponse {
            following: false,
            followers_count,
            following_count: me.following_count,
        })
    }

    pub async fn followers(&self, user_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<UserSummary>, AppError> {
        let user = self.load(user_id).await?;
        self.summaries(&user.followers, page).await
    }

    pub async fn following(&self, user_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<UserSummary>, AppError> {
        let user = self.load(user_id).await?;
        self.summaries(&user.following, page).await
    }

    /// 내가 수강 중인 강좌
    pub async fn my_courses(&self, auth: &AuthenticatedUser) -> Result<Vec<CourseSummary>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let courses = self.course_repo.find_by_ids(&me.enrolled_courses).await?;

        Ok(courses.iter().map(CourseSummary::from).collect())
    }

    /// 관리자용 전체 사용자 목록 (가입 최신순)
    pub async fn list_users(&self, page: &PaginationQuery) -> Result<PaginatedResponse<UserResponse>, AppError> {
        let users = self.user_repo.list(doc! {}, page).await?;
        Ok(users.map(UserResponse::from))
    }

    async fn load(&self, user_id: &str) -> Result<User, AppError> {
        let id = parse_object_id(user_id, "user_id")?;
        self.user_repo.find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 관계 배열 순서를 유지한 채 한 페이지를 요약으로 변환
    async fn summaries(&self, ids: &[mongodb::bson::oid::ObjectId], page: &PaginationQuery) -> Result<PaginatedResponse<UserSummary>, AppError> {
        let wanted = page_ids(ids, page);
        let users = self.user_repo.find_by_ids(&wanted).await?;

        let items = wanted
            .iter()
            .filter_map(|id| users.iter().find(|user| user.id.as_ref() == Some(id)))
            .map(UserSummary::from)
            .collect();

        Ok(PaginatedResponse::new(items, ids.len() as u64, page))
    }
}
