//! # 주소 서비스
//!
//! 기본 주소 규칙은 [`crate::domain::entities::commerce::address`]에 있고,
//! 이 서비스는 바뀐 문서만 골라 저장합니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::commerce::{AddressRequest, AddressResponse};
use crate::domain::entities::commerce::address::{apply_default, promotion_candidate, Address};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::commerce::address_repo::AddressRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "address")]
pub struct AddressService {
    address_repo: Arc<AddressRepository>,
    user_repo: Arc<UserRepository>,
}

fn apply_request(address: &mut Address, request: AddressRequest) {
    address.full_name = request.full_name.trim().to_string();
    address.phone = clean_optional_string(request.phone);
    address.line1 = request.line1.trim().to_string();
    address.line2 = clean_optional_string(request.line2);
    address.city = request.city.trim().to_string();
    address.state = clean_optional_string(request.state);
    address.postal_code = request.postal_code.trim().to_string();
    address.country = request.country.trim().to_string();
}

impl AddressService {
    /// 내 주소 목록 (기본 주소 먼저)
    pub async fn list(&self, auth: &AuthenticatedUser) -> Result<Vec<AddressResponse>, AppError> {
        let my_id = self.caller_id(auth).await?;
        let addresses = self.address_repo.list_by_user(&my_id).await?;
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    /// 주소 추가. 첫 주소이거나 `is_default: true`면 기본 주소가 됩니다.
    pub async fn create(&self, auth: &AuthenticatedUser, request: AddressRequest) -> Result<AddressResponse, AppError> {
        let my_id = self.caller_id(auth).await?;
        let make_default = request.is_default.unwrap_or(false)
            || self.address_repo.count_by_user(&my_id).await? == 0;

        let now = DateTime::now();
        let mut address = Address {
            id: None,
            user_id: my_id,
            full_name: String::new(),
            phone: None,
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: None,
            postal_code: String::new(),
            country: String::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        };
        apply_request(&mut address, request);

        let mut created = self.address_repo.create(address).await?;
        if make_default {
            let id = require_id(&created.id)?;
            self.make_default(&my_id, &id).await?;
            created.is_default = true;
        }

        Ok(AddressResponse::from(created))
    }

    pub async fn update(&self, auth: &AuthenticatedUser, address_id: &str, request: AddressRequest) -> Result<AddressResponse, AppError> {
        let my_id = self.caller_id(auth).await?;
        let mut address = self.load_own(&my_id, address_id).await?;
        let id = require_id(&address.id)?;
        let make_default = request.is_default.unwrap_or(false) && !address.is_default;

        apply_request(&mut address, request);
        address.touch();
        self.address_repo.save(&address).await?;

        if make_default {
            self.make_default(&my_id, &id).await?;
            address.is_default = true;
        }

        Ok(AddressResponse::from(address))
    }

    /// `PATCH /api/addresses/{id}/default`
    pub async fn set_default(&self, auth: &AuthenticatedUser, address_id: &str) -> Result<AddressResponse, AppError> {
        let my_id = self.caller_id(auth).await?;
        let mut address = self.load_own(&my_id, address_id).await?;
        let id = require_id(&address.id)?;

        self.make_default(&my_id, &id).await?;
        address.is_default = true;

        Ok(AddressResponse::from(address))
    }

    /// 삭제. 기본 주소였다면 남은 주소 중 가장 최근 것을 기본으로 올립니다.
    pub async fn delete(&self, auth: &AuthenticatedUser, address_id: &str) -> Result<(), AppError> {
        let my_id = self.caller_id(auth).await?;
        let address = self.load_own(&my_id, address_id).await?;
        let id = require_id(&address.id)?;

        self.address_repo.delete(&id).await?;

        if address.is_default {
            let remaining = self.address_repo.list_by_user(&my_id).await?;
            if let Some(next) = promotion_candidate(&remaining) {
                self.make_default(&my_id, &next).await?;
            }
        }

        Ok(())
    }

    /// 사용자의 주소 중 `default_id`만 기본으로 두고, 플래그가 바뀐 문서만 저장합니다.
    async fn make_default(&self, user_id: &ObjectId, default_id: &ObjectId) -> Result<(), AppError> {
        let mut addresses = self.address_repo.list_by_user(user_id).await?;
        let before: Vec<bool> = addresses.iter().map(|address| address.is_default).collect();

        apply_default(&mut addresses, default_id);

        for (address, was_default) in addresses.iter_mut().zip(before) {
            if address.is_default != was_default {
                address.touch();
                self.address_repo.save(address).await?;
            }
        }

        Ok(())
    }

    /// 내 주소만 조회. 남의 주소는 존재 여부를 드러내지 않도록 404.
    async fn load_own(&self, user_id: &ObjectId, address_id: &str) -> Result<Address, AppError> {
        let id = parse_object_id(address_id, "address_id")?;

        match self.address_repo.find_by_id(&id).await? {
            Some(address) if &address.user_id == user_id => Ok(address),
            _ => Err(AppError::NotFound("주소를 찾을 수 없습니다".to_string())),
        }
    }

    async fn caller_id(&self, auth: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        require_id(&me.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request_trims_and_cleans() {
        let mut address = Address {
            id: None,
            user_id: ObjectId::new(),
            full_name: String::new(),
            phone: Some("old".to_string()),
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: None,
            postal_code: String::new(),
            country: String::new(),
            is_default: true,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        };

        apply_request(&mut address, AddressRequest {
            full_name: " Kim ".to_string(),
            phone: Some("  ".to_string()),
            line1: "1 Main St".to_string(),
            city: "Seoul".to_string(),
            postal_code: " 04524 ".to_string(),
            country: "KR".to_string(),
            ..Default::default()
        });

        assert_eq!(address.full_name, "Kim");
        assert_eq!(address.phone, None);
        assert_eq!(address.postal_code, "04524");
        assert!(address.is_default);
    }
}
