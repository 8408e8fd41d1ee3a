pub(crate) mod auth;
pub(crate) mod checkout;
pub(crate) mod fixtures;
pub(crate) mod news;
pub(crate) mod products;
pub(crate) mod settings;
pub(crate) mod sliders;
pub(crate) mod sponsors;
pub(crate) mod standings;
pub(crate) mod teams;
pub(crate) mod tickets;
pub(crate) mod upload;
