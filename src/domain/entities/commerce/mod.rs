pub mod cart;
pub mod wishlist;
pub mod address;
