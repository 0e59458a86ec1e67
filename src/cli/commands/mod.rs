pub mod admin;
pub mod auth;
pub mod blog;
pub mod careers;
pub mod server;
