//! 장바구니 / 위시리스트 / 주소 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
