pub mod handlers;
pub mod images;
pub mod service;
pub mod store;
