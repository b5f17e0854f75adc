use axum::http::{header::AUTHORIZATION, Request};
use tower_cookies::{Cookies, Key};

use crate::Error;

/// Read the token from an `Authorization: Bearer` header. A header with any other shape is an error
/// rather than being ignored.
pub fn extract_bearer_auth_value<B>(req: &Request<B>) -> Result<Option<String>, Error> {
    match req.headers().get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => {
            let (auth_type, token) = value
                .to_str()
                .map_err(|_| Error::InvalidAuthHeader)?
                .split_once(' ')
                .ok_or(Error::InvalidAuthHeader)?;

            if auth_type != "Bearer" || token.is_empty() {
                return Err(Error::InvalidAuthHeader);
            }

            Ok(Some(token.to_string()))
        }
    }
}

/// Read a signed cookie. Cookies with a bad signature are treated as missing.
pub fn extract_from_signed_cookie<B>(
    req: &Request<B>,
    key: &Key,
    cookie_name: &str,
) -> Option<String> {
    req.extensions()
        .get::<Cookies>()
        .and_then(|cookies| cookies.signed(key).get(cookie_name))
        .map(|cookie| cookie.value().to_string())
}
