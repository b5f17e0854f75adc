pub mod api_key;
mod error;
mod extract_token;
pub mod password;
mod request;
pub mod session;

pub use error::*;
pub use request::*;
