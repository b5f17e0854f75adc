use async_trait::async_trait;
use axum::response::IntoResponse;
use chrono::{DateTime, Duration, Utc};
use tower_cookies::{Cookie, Cookies, Key};

use crate::Error;

#[async_trait]
pub trait SessionStore: Clone + Send + Sync + 'static {
    type UserId: Send + 'static;
    type SessionFetchData: Send + Sync + 'static;
    type Error: From<Error> + IntoResponse + Send + 'static;

    async fn create_session(
        &self,
        user_id: Self::UserId,
        expires: DateTime<Utc>,
    ) -> Result<String, Self::Error>;
    /// Look up an unexpired session. Unknown or malformed ids return `Ok(None)`.
    async fn get_session(&self, id: &str) -> Result<Option<Self::SessionFetchData>, Self::Error>;
    async fn delete_session(&self, id: &str) -> Result<(), Self::Error>;
}

#[derive(Clone)]
pub struct SessionCookieManager {
    pub signing_key: Key,
    pub cookie_name: String,
}

impl SessionCookieManager {
    pub fn new(cookie_name: String, key_bytes: &[u8]) -> Result<Self, Error> {
        let signing_key =
            Key::try_from(key_bytes).map_err(|e| Error::InvalidCookieKey(e.to_string()))?;
        Ok(Self {
            signing_key,
            cookie_name,
        })
    }

    pub fn get(&self, cookies: &Cookies) -> Option<String> {
        cookies
            .signed(&self.signing_key)
            .get(&self.cookie_name)
            .map(|c| c.value().to_string())
    }

    pub fn set(&self, cookies: &Cookies, session_id: String, max_age: Duration) {
        let cookie = Cookie::build(self.cookie_name.clone(), session_id)
            .path("/")
            .http_only(true)
            .max_age(time::Duration::seconds(max_age.num_seconds()))
            .finish();
        cookies.signed(&self.signing_key).add(cookie);
    }

    pub fn clear(&self, cookies: &Cookies) {
        let cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .finish();
        cookies.signed(&self.signing_key).remove(cookie);
    }
}

#[derive(Clone)]
pub struct SessionManager<STORE: SessionStore> {
    pub store: STORE,
    pub cookies: SessionCookieManager,
    pub expire_days: i64,
}

impl<STORE: SessionStore> SessionManager<STORE> {
    /// Start a session for the user and hand the client its cookie.
    pub async fn create_session(
        &self,
        cookies: &Cookies,
        user_id: STORE::UserId,
    ) -> Result<(), STORE::Error> {
        let lifetime = Duration::days(self.expire_days);
        let id = self
            .store
            .create_session(user_id, Utc::now() + lifetime)
            .await?;
        self.cookies.set(cookies, id, lifetime);
        Ok(())
    }

    pub async fn get_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<STORE::SessionFetchData>, STORE::Error> {
        match session_id {
            Some(id) => self.store.get_session(id).await,
            None => Ok(None),
        }
    }

    /// End the session named by the request's cookie, if there is one, and clear the cookie.
    pub async fn delete_session(&self, cookies: &Cookies) -> Result<(), STORE::Error> {
        if let Some(id) = self.cookies.get(cookies) {
            self.store.delete_session(&id).await?;
        }
        self.cookies.clear(cookies);
        Ok(())
    }
}
