//! BSON 시간과 chrono 시간 변환

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::DateTime;

/// 응답 DTO용 UTC 시각으로 변환합니다.
///
/// BSON `DateTime`은 JSON으로 직렬화하면 `{"$date": ...}` 형태가 되므로
/// 응답에서는 RFC 3339 문자열로 나가는 chrono 타입을 사용합니다.
pub fn to_utc(value: DateTime) -> ChronoDateTime<Utc> {
    ChronoDateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

pub fn to_utc_opt(value: Option<DateTime>) -> Option<ChronoDateTime<Utc>> {
    value.map(to_utc)
}

/// 요청으로 받은 chrono 시각을 BSON `DateTime`으로 변환합니다.
pub fn from_utc(value: ChronoDateTime<Utc>) -> DateTime {
    DateTime::from_millis(value.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_millis() {
        let now = DateTime::now();
        assert_eq!(from_utc(to_utc(now)), now);
    }

    #[test]
    fn test_epoch() {
        let epoch = DateTime::from_millis(0);
        assert_eq!(to_utc(epoch).timestamp(), 0);
    }
}
