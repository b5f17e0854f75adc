use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sports_hub_http_errors::ErrorResponseData;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid API key format")]
    InvalidApiKeyFormat,

    #[error("Invalid authorization header")]
    InvalidAuthHeader,

    #[error("Unknown or expired API key")]
    UnknownApiKey,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Password hashing failed: {0}")]
    PasswordHasherError(String),

    #[error("Invalid cookie signing key: {0}")]
    InvalidCookieKey(String),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::PasswordHasherError(_) | Error::InvalidCookieKey(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::PasswordHasherError(_) | Error::InvalidCookieKey(_) => "internal_server_error",
            _ => "authn",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorResponseData::new(self.kind(), self.to_string());
        (self.status(), Json(body)).into_response()
    }
}
