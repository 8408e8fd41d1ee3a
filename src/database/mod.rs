pub mod connection;
pub mod standings;
