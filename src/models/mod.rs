pub mod fixture;
pub mod news;
pub mod product;
pub mod settings;
pub mod slider;
pub mod sponsor;
pub mod standing;
pub mod team;
pub mod ticket;
