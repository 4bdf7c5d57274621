//! 리포지토리 공통 조회 헬퍼

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::results::InsertOneResult;
use mongodb::Collection;
use serde::de::DeserializeOwned;
use crate::core::errors::{db_error, AppError, AppResult};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::utils::string_utils::escape_regex;

/// `filter`에 맞는 문서를 정렬 후 한 페이지만 조회하고 전체 개수를 함께 돌려줍니다.
pub async fn find_page<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
    page: &PaginationQuery,
) -> AppResult<PaginatedResponse<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    let total = collection
        .count_documents(filter.clone())
        .await
        .map_err(db_error)?;

    let items: Vec<T> = collection
        .find(filter)
        .sort(sort)
        .skip(page.skip())
        .limit(page.limit_i64())
        .await
        .map_err(db_error)?
        .try_collect()
        .await
        .map_err(db_error)?;

    Ok(PaginatedResponse::new(items, total, page))
}

/// 페이지 없이 전부 (또는 `limit`개) 조회합니다.
pub async fn find_all<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
    limit: Option<i64>,
) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    let mut find = collection.find(filter).sort(sort);
    if let Some(limit) = limit {
        find = find.limit(limit);
    }

    find.await
        .map_err(db_error)?
        .try_collect()
        .await
        .map_err(db_error)
}

/// 집계 파이프라인을 실행하고 결과 문서를 모두 모읍니다.
pub async fn aggregate_all<T>(collection: &Collection<T>, pipeline: Vec<Document>) -> AppResult<Vec<Document>>
where
    T: Send + Sync,
{
    collection
        .aggregate(pipeline)
        .await
        .map_err(db_error)?
        .try_collect()
        .await
        .map_err(db_error)
}

/// 집계 결과의 숫자 필드를 `f64`로 읽습니다. 없거나 숫자가 아니면 0.
pub fn number_field(document: &Document, key: &str) -> f64 {
    match document.get(key) {
        Some(Bson::Double(value)) => *value,
        Some(Bson::Int32(value)) => f64::from(*value),
        Some(Bson::Int64(value)) => *value as f64,
        _ => 0.0,
    }
}

pub fn inserted_object_id(result: &InsertOneResult) -> AppResult<ObjectId> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::InternalError("삽입된 문서 ID를 확인할 수 없습니다".to_string()))
}

/// 대소문자를 무시하는 부분 문자열 검색 조건
pub fn contains_ignore_case(term: &str) -> Document {
    doc! { "$regex": escape_regex(term.trim()), "$options": "i" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case_escapes_input() {
        let filter = contains_ignore_case(" c++ ");

        assert_eq!(filter.get_str("$regex").unwrap(), "c\\+\\+");
        assert_eq!(filter.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_number_field_reads_any_numeric_type() {
        let document = doc! { "a": 3_i32, "b": 4_i64, "c": 2.5, "d": "x" };

        assert_eq!(number_field(&document, "a"), 3.0);
        assert_eq!(number_field(&document, "b"), 4.0);
        assert_eq!(number_field(&document, "c"), 2.5);
        assert_eq!(number_field(&document, "d"), 0.0);
        assert_eq!(number_field(&document, "missing"), 0.0);
    }
}
