//! 사용자 프로필 리포지토리
//!
//! [`UserRepository`](user_repo::UserRepository)는 Clerk ID → 로컬 프로필 조회를 Redis에 캐싱합니다.

pub mod user_repo;
