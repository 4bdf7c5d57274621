use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::entities::users::user::User;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

/// 공개 프로필
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: id_hex(&user.id),
            username: user.username,
            display_name: user.display_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            followers_count: user.followers_count,
            following_count: user.following_count,
            created_at: to_utc(user.created_at),
        }
    }
}

/// 내 프로필 (`/api/users/me`)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub roles: Vec<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub enrolled_courses: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            clerk_id,
            email,
            username,
            display_name,
            bio,
            avatar_url,
            roles,
            followers_count,
            following_count,
            enrolled_courses,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id_hex(&id),
            clerk_id,
            email,
            username,
            display_name,
            bio,
            avatar_url,
            roles,
            followers_count,
            following_count,
            enrolled_courses: enrolled_courses.iter().map(|id| id.to_hex()).collect(),
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 다른 응답에 포함되는 작성자/사용자 요약
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: id_hex(&user.id),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// 팔로우/언팔로우 결과
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowResponse {
    pub following: bool,
    /// 대상 사용자의 팔로워 수
    pub followers_count: i64,
    /// 나의 팔로잉 수
    pub following_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_profile_response_hex_ids() {
        let mut user = User::new("user_1".into(), "a@example.com".into(), "alice".into(), "Alice".into());
        let course_id = ObjectId::new();
        user.id = Some(ObjectId::new());
        user.enroll(course_id);

        let response = ProfileResponse::from(user.clone());

        assert_eq!(response.id, user.id.unwrap().to_hex());
        assert_eq!(response.enrolled_courses, vec![course_id.to_hex()]);
    }
}
