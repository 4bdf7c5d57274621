//! 장바구니 / 위시리스트 / 주소 서비스

pub mod cart_service;
pub mod wishlist_service;
pub mod address_service;

pub use cart_service::CartService;
pub use wishlist_service::WishlistService;
pub use address_service::AddressService;
