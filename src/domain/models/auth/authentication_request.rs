use std::fmt;

/// 라우트 스코프의 인증 모드
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 토큰이 없거나 유효하지 않으면 401
    Required,
    /// 토큰이 있으면 검증하고, 없으면 익명으로 진행 (검색 등)
    Optional,
}

/// 스코프 접근에 필요한 역할
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    Single(String),
    /// 나열된 역할 중 하나 (OR)
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn admin() -> Self {
        RequiredRole::Single("admin".to_string())
    }

    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required) => user_roles.iter().any(|r| r == required),
            RequiredRole::Any(required) => required.iter().any(|role| user_roles.contains(role)),
        }
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredRole::Single(role) => write!(f, "{}", role),
            RequiredRole::Any(roles) => write!(f, "{}", roles.join(" | ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_admin_role_required() {
        let required = RequiredRole::admin();

        assert!(required.is_satisfied(&roles(&["admin", "user"])));
        assert!(!required.is_satisfied(&roles(&["user"])));
    }

    #[test]
    fn test_any_role() {
        let required = RequiredRole::Any(roles(&["admin", "instructor"]));

        assert!(required.is_satisfied(&roles(&["instructor", "user"])));
        assert!(!required.is_satisfied(&roles(&["user"])));
        assert_eq!(required.to_string(), "admin | instructor");
    }
}
