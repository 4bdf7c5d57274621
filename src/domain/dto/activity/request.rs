use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 검색 대상
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    All,
    Courses,
    Users,
    Posts,
    Jobs,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::All => "all",
            SearchKind::Courses => "courses",
            SearchKind::Users => "users",
            SearchKind::Posts => "posts",
            SearchKind::Jobs => "jobs",
        }
    }

    pub fn includes(&self, other: SearchKind) -> bool {
        *self == SearchKind::All || *self == other
    }
}

/// `GET /api/search?q=&kind=`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// 필수, 공백 불가
    pub q: Option<String>,
    pub kind: Option<SearchKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inclusion() {
        assert!(SearchKind::All.includes(SearchKind::Jobs));
        assert!(SearchKind::Posts.includes(SearchKind::Posts));
        assert!(!SearchKind::Posts.includes(SearchKind::Users));
    }

    #[test]
    fn test_kind_parses_lowercase() {
        let query: SearchQuery = serde_json::from_str(r#"{ "q": "rust", "kind": "courses" }"#).unwrap();
        assert_eq!(query.kind, Some(SearchKind::Courses));
    }
}
