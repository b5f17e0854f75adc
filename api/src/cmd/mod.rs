pub mod admin;
pub mod server;
