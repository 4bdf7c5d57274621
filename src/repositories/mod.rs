//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로로 싱글톤 등록되며, 모두 `db: Arc<Database>`와
//! `redis: Arc<RedisClient>`를 주입받습니다. 컬렉션 하나당 리포지토리 하나입니다.
//!
//! 쓰기는 읽은 문서를 수정한 뒤 `replace_one`으로 통째로 저장합니다.
//! 동시 수정 시 마지막 쓰기가 남습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::courses::course_repo::CourseRepository;
//!
//! let course_repo = CourseRepository::instance();
//! let course = course_repo.get(&course_id).await?;
//! ```

pub mod common;
pub mod users;
pub mod courses;
pub mod quizzes;
pub mod jobs;
pub mod commerce;
pub mod social;
pub mod content;
pub mod activity;
pub mod media;
