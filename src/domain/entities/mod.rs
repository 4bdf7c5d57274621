//! # Domain Entities
//!
//! MongoDB 컬렉션에 저장되는 문서 타입입니다.
//! 문서 간 참조는 모두 `ObjectId`이며, 사용자 참조는 Clerk ID가 아닌
//! 로컬 `users` 문서의 ID를 가리킵니다.
//!
//! 파생 필드(카운터, 평균 평점, 총점)는 엔티티 메서드가 갱신하므로
//! 서비스는 메서드를 호출한 뒤 문서를 통째로 저장합니다.

pub mod users;
pub mod courses;
pub mod quizzes;
pub mod jobs;
pub mod commerce;
pub mod social;
pub mod content;
pub mod activity;
pub mod media;
