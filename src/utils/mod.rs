//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증/정리, 해시태그 추출, 정규식 이스케이프
//! - [`id_utils`] - ObjectId 파싱
//! - [`time_utils`] - BSON ↔ chrono 시간 변환
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들

pub mod string_utils;
pub mod id_utils;
pub mod time_utils;
pub mod display_terminal;
