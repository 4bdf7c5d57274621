//! 목록 API 공통 DTO

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use crate::config::PaginationConfig;

/// `?page=&limit=` 쿼리
///
/// 범위를 벗어난 값은 거절하지 않고 보정합니다.
/// `page`는 최소 1, `limit`은 1~100입니다.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1부터 시작 (기본 1)
    pub page: Option<u64>,
    /// 페이지 크기 (기본 20, 최대 100)
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page: Some(page), limit: Some(limit) }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(PaginationConfig::DEFAULT_LIMIT)
            .clamp(1, PaginationConfig::MAX_LIMIT)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }

    pub fn limit_i64(&self) -> i64 {
        self.limit() as i64
    }
}

/// 페이지네이션 목록 응답
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, query: &PaginationQuery) -> Self {
        let limit = query.limit();
        Self {
            items,
            total,
            page: query.page(),
            limit,
            total_pages: total.div_ceil(limit),
        }
    }

    /// 항목 타입을 변환합니다. (엔티티 → 응답 DTO)
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// 단순 메시지 응답 (`{ "message": "..." }`)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 에러 응답 (`{ "error": "..." }`)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PaginationQuery::default();

        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let query = PaginationQuery { page: Some(0), limit: Some(500) };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);

        let query = PaginationQuery { page: Some(3), limit: Some(0) };
        assert_eq!(query.limit(), 1);
        assert_eq!(query.skip(), 2);
    }

    #[test]
    fn test_total_pages() {
        let query = PaginationQuery::new(2, 10);
        let response = PaginatedResponse::new(vec![1, 2, 3], 21, &query);

        assert_eq!(response.total_pages, 3);
        assert_eq!(response.page, 2);

        let empty = PaginatedResponse::<u8>::new(vec![], 0, &query);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = PaginatedResponse::new(vec![1, 2], 2, &PaginationQuery::default())
            .map(|n| n * 10);

        assert_eq!(response.items, vec![10, 20]);
        assert_eq!(response.total, 2);
    }
}
