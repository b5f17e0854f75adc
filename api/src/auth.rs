use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use auth::session::{SessionCookieManager, SessionManager};
use auth::{AuthenticationLayer, RequestUser};
use db::object_id::UserId;
use db::PoolExt;

use sports_hub_auth as auth;
use sports_hub_db as db;

use crate::Error;

/// The user behind the current request.
#[derive(Clone, Debug, Serialize, Queryable)]
pub struct UserInfo {
    pub user_id: UserId,
    pub username: String,
}

pub struct ApiKeyNewData {
    pub user_id: UserId,
    pub name: String,
}

#[derive(Clone)]
pub struct ApiKeyStore {
    pub db: db::Pool,
}

#[async_trait]
impl auth::api_key::ApiKeyStore for ApiKeyStore {
    type FetchData = UserInfo;
    type NewData = ApiKeyNewData;
    type Error = crate::Error;

    async fn lookup_api_key(
        &self,
        key_id: Uuid,
        hash: auth::api_key::Hash,
    ) -> Result<Option<Self::FetchData>, Self::Error> {
        self.db
            .interact(move |conn| {
                db::api_keys::table
                    .inner_join(db::users::table)
                    .filter(db::api_keys::api_key_id.eq(key_id))
                    .filter(db::api_keys::hash.eq(hash.as_bytes().as_slice()))
                    .filter(db::api_keys::expires.gt(diesel::dsl::now))
                    .select((db::users::id, db::users::username))
                    .first::<UserInfo>(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    async fn create_api_key(
        &self,
        key: auth::api_key::ApiKeyData,
        data: ApiKeyNewData,
    ) -> Result<(), Self::Error> {
        let input = db::api_keys::ApiKey {
            api_key_id: key.api_key_id,
            prefix: key.prefix,
            hash: key.hash.as_bytes().to_vec(),
            user_id: data.user_id,
            name: data.name,
            created: Utc::now(),
            expires: key.expires,
        };

        self.db
            .interact(move |conn| {
                diesel::insert_into(db::api_keys::table)
                    .values(&input)
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await?;
        Ok(())
    }

    async fn disable_api_key(&self, key_id: Uuid) -> Result<(), Self::Error> {
        self.db
            .interact(move |conn| {
                diesel::delete(db::api_keys::table)
                    .filter(db::api_keys::api_key_id.eq(key_id))
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await?;

        Ok(())
    }
}

#[derive(Clone)]
pub struct SessionStore {
    pub db: db::Pool,
}

#[async_trait]
impl auth::session::SessionStore for SessionStore {
    type UserId = UserId;
    type SessionFetchData = UserInfo;
    type Error = crate::Error;

    async fn create_session(
        &self,
        user_id: UserId,
        expires: DateTime<Utc>,
    ) -> Result<String, Self::Error> {
        let session_id = self
            .db
            .interact(move |conn| {
                let input = db::sessions::Session {
                    id: db::new_uuid(),
                    user_id,
                    expires,
                };

                diesel::insert_into(db::sessions::table)
                    .values(&input)
                    .execute(conn)?;

                Ok::<Uuid, crate::Error>(input.id)
            })
            .await?;

        Ok(session_id.to_string())
    }

    async fn get_session(&self, id: &str) -> Result<Option<Self::SessionFetchData>, Self::Error> {
        let Ok(session_id) = id.parse::<Uuid>() else {
            return Ok(None);
        };

        self.db
            .interact(move |conn| {
                db::sessions::table
                    .inner_join(db::users::table)
                    .filter(db::sessions::id.eq(session_id))
                    .filter(db::sessions::expires.gt(diesel::dsl::now))
                    .select((db::users::id, db::users::username))
                    .first::<UserInfo>(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    async fn delete_session(&self, id: &str) -> Result<(), Self::Error> {
        let Ok(session_id) = id.parse::<Uuid>() else {
            return Ok(());
        };

        self.db
            .interact(move |conn| {
                diesel::delete(db::sessions::table)
                    .filter(db::sessions::id.eq(session_id))
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await?;

        Ok(())
    }
}

impl From<RequestUser<UserInfo, UserInfo>> for UserInfo {
    fn from(u: RequestUser<UserInfo, UserInfo>) -> Self {
        match u {
            RequestUser::ApiKey(user) => user,
            RequestUser::Session(user) => user,
        }
    }
}

/// Extractor for handlers that require a logged-in user.
pub struct Authenticated(pub UserInfo);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserInfo>()
            .cloned()
            .map(Authenticated)
            .ok_or(Error::Unauthenticated)
    }
}

pub fn session_manager(
    db: db::Pool,
    cookie_name: String,
    cookie_key: &[u8],
) -> Result<SessionManager<SessionStore>, Error> {
    Ok(SessionManager {
        store: SessionStore { db },
        cookies: SessionCookieManager::new(cookie_name, cookie_key)?,
        expire_days: 30,
    })
}

pub fn auth_layer(
    db: db::Pool,
    sessions: SessionManager<SessionStore>,
) -> AuthenticationLayer<UserInfo, ApiKeyStore, SessionStore> {
    AuthenticationLayer::new(ApiKeyStore { db }, sessions)
}
