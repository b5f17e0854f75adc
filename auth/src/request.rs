use std::marker::PhantomData;

use axum::{
    body::{Body, BoxBody},
    http::{Request, Response},
    response::IntoResponse,
};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::{
    api_key::{ApiKeyManager, ApiKeyStore},
    extract_token::{extract_bearer_auth_value, extract_from_signed_cookie},
    session::{SessionManager, SessionStore},
};

/// Identifies the user behind a request, from an API key or a session cookie, and
/// stores the result as a `USERDATA` request extension. Requests without
/// credentials pass through untouched. A malformed or unknown API key is rejected.
pub struct AuthenticationLayer<USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> {
    pub api_keys: ApiKeyManager<APIKEYSTORE>,
    pub sessions: SessionManager<SESSIONSTORE>,

    user_data_phantom: PhantomData<fn() -> USERDATA>,
}

impl<USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore>
    AuthenticationLayer<USERDATA, APIKEYSTORE, SESSIONSTORE>
{
    pub fn new(api_key_store: APIKEYSTORE, session_manager: SessionManager<SESSIONSTORE>) -> Self {
        Self {
            api_keys: ApiKeyManager {
                store: api_key_store,
            },
            sessions: session_manager,
            user_data_phantom: PhantomData,
        }
    }
}

impl<USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> Clone
    for AuthenticationLayer<USERDATA, APIKEYSTORE, SESSIONSTORE>
{
    fn clone(&self) -> Self {
        Self {
            api_keys: self.api_keys.clone(),
            sessions: self.sessions.clone(),
            user_data_phantom: PhantomData,
        }
    }
}

impl<S, USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> Layer<S>
    for AuthenticationLayer<USERDATA, APIKEYSTORE, SESSIONSTORE>
{
    type Service = Authenticator<S, USERDATA, APIKEYSTORE, SESSIONSTORE>;

    fn layer(&self, inner: S) -> Self::Service {
        Authenticator {
            api_keys: self.api_keys.clone(),
            sessions: self.sessions.clone(),
            user_data_phantom: PhantomData,
            inner,
        }
    }
}

pub enum RequestUser<ApiKeyData, SessionData> {
    ApiKey(ApiKeyData),
    Session(SessionData),
}

pub struct Authenticator<S, USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> {
    api_keys: ApiKeyManager<APIKEYSTORE>,
    sessions: SessionManager<SESSIONSTORE>,
    user_data_phantom: PhantomData<fn() -> USERDATA>,
    inner: S,
}

impl<S: Clone, USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> Clone
    for Authenticator<S, USERDATA, APIKEYSTORE, SESSIONSTORE>
{
    fn clone(&self) -> Self {
        Self {
            api_keys: self.api_keys.clone(),
            sessions: self.sessions.clone(),
            user_data_phantom: PhantomData,
            inner: self.inner.clone(),
        }
    }
}

pub enum AuthenticatorError<APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> {
    Header(crate::Error),
    ApiKeyStore(APIKEYSTORE::Error),
    SessionStore(SESSIONSTORE::Error),
}

impl<APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore> IntoResponse
    for AuthenticatorError<APIKEYSTORE, SESSIONSTORE>
{
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Header(e) => e.into_response(),
            Self::ApiKeyStore(e) => e.into_response(),
            Self::SessionStore(e) => e.into_response(),
        }
    }
}

impl<S, USERDATA, APIKEYSTORE: ApiKeyStore, SESSIONSTORE: SessionStore>
    Authenticator<S, USERDATA, APIKEYSTORE, SESSIONSTORE>
{
    async fn get_auth_info(
        api_keys: ApiKeyManager<APIKEYSTORE>,
        sessions: SessionManager<SESSIONSTORE>,
        api_key: Option<String>,
        session_id: Option<String>,
    ) -> Result<
        Option<RequestUser<APIKEYSTORE::FetchData, SESSIONSTORE::SessionFetchData>>,
        AuthenticatorError<APIKEYSTORE, SESSIONSTORE>,
    > {
        if let Some(key) = api_key {
            let data = api_keys
                .authenticate(&key)
                .await
                .map_err(AuthenticatorError::ApiKeyStore)?;
            return Ok(Some(RequestUser::ApiKey(data)));
        }

        let session = sessions
            .get_session(session_id.as_deref())
            .await
            .map_err(AuthenticatorError::SessionStore)?
            .map(RequestUser::Session);

        Ok(session)
    }
}

impl<S, USERDATA, APIKEYSTORE, SESSIONSTORE> Service<Request<Body>>
    for Authenticator<S, USERDATA, APIKEYSTORE, SESSIONSTORE>
where
    S: Service<Request<Body>> + Send + Clone + 'static,
    S::Future: Send + 'static,
    S::Response: IntoResponse + Send + 'static,
    APIKEYSTORE: ApiKeyStore,
    SESSIONSTORE: SessionStore,
    USERDATA: From<RequestUser<APIKEYSTORE::FetchData, SESSIONSTORE::SessionFetchData>>
        + Clone
        + Send
        + Sync
        + 'static,
{
    type Response = Response<BoxBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let inner = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner);

        let api_keys = self.api_keys.clone();
        let sessions = self.sessions.clone();

        // Pull the credentials out up front so the request isn't borrowed across awaits.
        let api_key = match extract_bearer_auth_value(&req) {
            Ok(key) => key,
            Err(e) => {
                let response = AuthenticatorError::<APIKEYSTORE, SESSIONSTORE>::Header(e)
                    .into_response();
                return Box::pin(async move { Ok(response) });
            }
        };
        let session_id = extract_from_signed_cookie(
            &req,
            &sessions.cookies.signing_key,
            &sessions.cookies.cookie_name,
        );

        Box::pin(async move {
            let auth_result = Self::get_auth_info(api_keys, sessions, api_key, session_id).await;
            match auth_result {
                Ok(Some(user)) => {
                    req.extensions_mut().insert(USERDATA::from(user));
                }
                Ok(None) => {}
                Err(e) => return Ok(e.into_response()),
            }

            Ok(inner.call(req).await?.into_response())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode, response::IntoResponse};
    use chrono::{DateTime, Utc};
    use tower::{service_fn, Layer, ServiceExt};
    use uuid::Uuid;

    use super::*;
    use crate::{
        api_key::{ApiKeyData, Hash},
        session::SessionCookieManager,
        Error,
    };

    #[derive(Clone)]
    struct KeyStore {
        known: (Uuid, Hash),
    }

    #[async_trait]
    impl ApiKeyStore for KeyStore {
        type FetchData = String;
        type NewData = ();
        type Error = Error;

        async fn lookup_api_key(&self, key_id: Uuid, hash: Hash) -> Result<Option<String>, Error> {
            Ok((self.known == (key_id, hash)).then(|| "key user".to_string()))
        }

        async fn create_api_key(&self, _key: ApiKeyData, _data: ()) -> Result<(), Error> {
            Ok(())
        }

        async fn disable_api_key(&self, _key_id: Uuid) -> Result<(), Error> {
            Ok(())
        }
    }

    #[derive(Clone)]
    struct NoSessions;

    #[async_trait]
    impl SessionStore for NoSessions {
        type UserId = String;
        type SessionFetchData = String;
        type Error = Error;

        async fn create_session(
            &self,
            user_id: String,
            _expires: DateTime<Utc>,
        ) -> Result<String, Error> {
            Ok(user_id)
        }

        async fn get_session(&self, _id: &str) -> Result<Option<String>, Error> {
            Ok(None)
        }

        async fn delete_session(&self, _id: &str) -> Result<(), Error> {
            Ok(())
        }
    }

    #[derive(Clone, Debug)]
    struct User(String);

    impl From<RequestUser<String, String>> for User {
        fn from(u: RequestUser<String, String>) -> Self {
            match u {
                RequestUser::ApiKey(name) | RequestUser::Session(name) => User(name),
            }
        }
    }

    fn test_layer(key: &ApiKeyData) -> AuthenticationLayer<User, KeyStore, NoSessions> {
        let sessions = SessionManager {
            store: NoSessions,
            cookies: SessionCookieManager::new("sid".to_string(), &[7u8; 64]).unwrap(),
            expire_days: 1,
        };
        AuthenticationLayer::new(
            KeyStore {
                known: (key.api_key_id, key.hash),
            },
            sessions,
        )
    }

    async fn call(
        layer: &AuthenticationLayer<User, KeyStore, NoSessions>,
        auth: Option<String>,
    ) -> (StatusCode, Option<String>) {
        let inner = service_fn(|req: Request<Body>| async move {
            let user = req.extensions().get::<User>().map(|u| u.0.clone());
            Ok::<_, Infallible>((StatusCode::OK, user.unwrap_or_default()).into_response())
        });

        let mut builder = Request::get("/");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        let req = builder.body(Body::empty()).unwrap();

        let res = layer.layer(inner).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        (status, (!body.is_empty()).then_some(body))
    }

    #[tokio::test]
    async fn anonymous_request_passes_through() {
        let key = ApiKeyData::new(Utc::now());
        let (status, user) = call(&test_layer(&key), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn valid_key_sets_user() {
        let key = ApiKeyData::new(Utc::now());
        let (status, user) = call(&test_layer(&key), Some(format!("Bearer {}", key.key))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user.as_deref(), Some("key user"));
    }

    #[tokio::test]
    async fn unknown_key_rejected() {
        let key = ApiKeyData::new(Utc::now());
        let other = ApiKeyData::new(Utc::now());
        let (status, _) = call(&test_layer(&key), Some(format!("Bearer {}", other.key))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_rejected() {
        let key = ApiKeyData::new(Utc::now());
        let (status, _) = call(&test_layer(&key), Some("Token abc".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
