//! 사용자 프로필 엔티티
//!
//! 인증 정보는 Clerk가 보관하고, 여기에는 서비스 내 프로필과
//! 팔로우/수강 관계만 저장합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// `users` 컬렉션 문서
///
/// `followers_count` / `following_count`는 배열 길이와 항상 같아야 하며,
/// 배열을 바꾸는 메서드가 [`User::sync_counts`]를 호출합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Clerk 사용자 ID (unique)
    pub clerk_id: String,
    pub email: String,
    /// unique, 3~30자, 영문/숫자/밑줄
    pub username: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub followers: Vec<ObjectId>,
    #[serde(default)]
    pub following: Vec<ObjectId>,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
    #[serde(default)]
    pub enrolled_courses: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn new(clerk_id: String, email: String, username: String, display_name: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            clerk_id,
            email,
            username,
            display_name,
            bio: None,
            avatar_url: None,
            roles: vec!["user".to_string()],
            followers: Vec::new(),
            following: Vec::new(),
            followers_count: 0,
            following_count: 0,
            enrolled_courses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn sync_counts(&mut self) {
        self.followers_count = self.followers.len() as i64;
        self.following_count = self.following.len() as i64;
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    pub fn is_following(&self, user_id: &ObjectId) -> bool {
        self.following.contains(user_id)
    }

    /// 팔로우 목록에 추가. 이미 있으면 `false`.
    pub fn follow(&mut self, user_id: ObjectId) -> bool {
        if self.is_following(&user_id) {
            return false;
        }
        self.following.push(user_id);
        self.sync_counts();
        true
    }

    pub fn unfollow(&mut self, user_id: &ObjectId) -> bool {
        let before = self.following.len();
        self.following.retain(|id| id != user_id);
        self.sync_counts();
        before != self.following.len()
    }

    pub fn add_follower(&mut self, user_id: ObjectId) -> bool {
        if self.followers.contains(&user_id) {
            return false;
        }
        self.followers.push(user_id);
        self.sync_counts();
        true
    }

    pub fn remove_follower(&mut self, user_id: &ObjectId) -> bool {
        let before = self.followers.len();
        self.followers.retain(|id| id != user_id);
        self.sync_counts();
        before != self.followers.len()
    }

    pub fn is_enrolled(&self, course_id: &ObjectId) -> bool {
        self.enrolled_courses.contains(course_id)
    }

    pub fn enroll(&mut self, course_id: ObjectId) -> bool {
        if self.is_enrolled(&course_id) {
            return false;
        }
        self.enrolled_courses.push(course_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        let mut user = User::new(
            format!("user_{}", name),
            format!("{}@example.com", name),
            name.to_string(),
            name.to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_follow_keeps_counts_in_sync() {
        let mut alice = user("alice");
        let bob = user("bob");
        let bob_id = bob.id.unwrap();

        assert!(alice.follow(bob_id));
        assert!(!alice.follow(bob_id));
        assert_eq!(alice.following_count, 1);
        assert_eq!(alice.following_count as usize, alice.following.len());

        assert!(alice.unfollow(&bob_id));
        assert!(!alice.unfollow(&bob_id));
        assert_eq!(alice.following_count, 0);
    }

    #[test]
    fn test_followers_keep_counts_in_sync() {
        let mut alice = user("alice");
        let bob_id = ObjectId::new();
        let carol_id = ObjectId::new();

        alice.add_follower(bob_id);
        alice.add_follower(carol_id);
        alice.add_follower(bob_id);
        assert_eq!(alice.followers_count, 2);

        alice.remove_follower(&bob_id);
        assert_eq!(alice.followers, vec![carol_id]);
        assert_eq!(alice.followers_count, 1);
    }

    #[test]
    fn test_enroll_is_idempotent() {
        let mut alice = user("alice");
        let course_id = ObjectId::new();

        assert!(alice.enroll(course_id));
        assert!(!alice.enroll(course_id));
        assert!(alice.is_enrolled(&course_id));
        assert_eq!(alice.enrolled_courses.len(), 1);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("user_1".into(), "a@b.c".into(), "abc".into(), "ABC".into());

        assert_eq!(user.roles, vec!["user"]);
        assert!(user.id.is_none());
        assert_eq!(user.followers_count, 0);
    }
}
