//! 장바구니 / 위시리스트 / 주소 리포지토리

pub mod cart_repo;
pub mod wishlist_repo;
pub mod address_repo;
