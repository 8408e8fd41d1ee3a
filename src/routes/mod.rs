pub mod admin;
pub mod content;
pub mod fixtures;
pub mod shop;
pub mod standings;
pub mod teams;
