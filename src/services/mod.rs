pub mod auth;
pub mod cart;
pub mod cloudinary;
pub mod stripe;
