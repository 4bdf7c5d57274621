//! 서비스 공통 권한 / 목록 헬퍼

use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppError;
use crate::domain::dto::common::PaginationQuery;
use crate::domain::models::auth::AuthenticatedUser;

/// 소유자가 아니면 관리자만 통과합니다. 둘 다 아니면 403.
pub fn ensure_owner_or_admin(is_owner: bool, auth: &AuthenticatedUser, message: &str) -> Result<(), AppError> {
    if is_owner || auth.is_admin() {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(message.to_string()))
    }
}

/// ID 배열에서 요청한 페이지에 해당하는 구간만 잘라냅니다.
pub fn page_ids(ids: &[ObjectId], page: &PaginationQuery) -> Vec<ObjectId> {
    ids.iter()
        .skip(page.skip() as usize)
        .take(page.limit() as usize)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user_1".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_owner_or_admin() {
        assert!(ensure_owner_or_admin(true, &auth(&["user"]), "x").is_ok());
        assert!(ensure_owner_or_admin(false, &auth(&["user", "admin"]), "x").is_ok());
        assert!(matches!(
            ensure_owner_or_admin(false, &auth(&["user"]), "x"),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_page_ids() {
        let ids: Vec<ObjectId> = (0..5).map(|_| ObjectId::new()).collect();

        assert_eq!(page_ids(&ids, &PaginationQuery::new(1, 2)), ids[0..2].to_vec());
        assert_eq!(page_ids(&ids, &PaginationQuery::new(3, 2)), ids[4..5].to_vec());
        assert!(page_ids(&ids, &PaginationQuery::new(4, 2)).is_empty());
    }
}
