use async_trait::async_trait;
use axum::response::IntoResponse;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use tracing::{event, instrument, Level};
use uuid::Uuid;

use crate::error::Error;

/// Every key starts with this, so keys are recognizable in logs and secret scanners.
pub const KEY_PREFIX: &str = "sh1";

/// Length of `sh1.` plus two unpadded base64 UUIDs joined by a dot.
const KEY_LENGTH: usize = 49;

pub type Hash = blake3::Hash;

pub struct ApiKeyData {
    pub api_key_id: Uuid,
    pub key: String,
    pub prefix: String,
    pub hash: Hash,
    pub expires: DateTime<Utc>,
}

impl ApiKeyData {
    pub fn new(expires: DateTime<Utc>) -> ApiKeyData {
        let id = Uuid::new_v4();
        let base64_id = URL_SAFE_NO_PAD.encode(id.as_bytes());
        let random = URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes());
        let key = format!("{}.{}.{}", KEY_PREFIX, base64_id, random);
        let prefix = key[0..10].to_string();
        let hash = hash_key(&key);

        ApiKeyData {
            api_key_id: id,
            key,
            prefix,
            hash,
            expires,
        }
    }
}

fn hash_key(key: &str) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(key.as_bytes());
    hasher.finalize()
}

pub(crate) fn decode_key(key: &str) -> Result<(Uuid, Hash), Error> {
    if key.len() != KEY_LENGTH {
        return Err(Error::InvalidApiKeyFormat);
    }

    let mut segments = key.split('.');
    if segments.next() != Some(KEY_PREFIX) {
        return Err(Error::InvalidApiKeyFormat);
    }

    let id_portion = segments.next().ok_or(Error::InvalidApiKeyFormat)?;
    let api_key_bytes = URL_SAFE_NO_PAD
        .decode(id_portion.as_bytes())
        .map_err(|_| Error::InvalidApiKeyFormat)?;
    let api_key_id = Uuid::from_slice(&api_key_bytes).map_err(|_| Error::InvalidApiKeyFormat)?;

    let hash = hash_key(key);
    Ok((api_key_id, hash))
}

#[async_trait]
pub trait ApiKeyStore: Clone + Send + Sync + 'static {
    type FetchData: Send + Sync + 'static;
    type NewData: Send + 'static;
    type Error: From<Error> + IntoResponse + Send + 'static;

    /// Find an unexpired key with this ID and hash.
    async fn lookup_api_key(
        &self,
        key_id: Uuid,
        hash: Hash,
    ) -> Result<Option<Self::FetchData>, Self::Error>;
    async fn create_api_key(
        &self,
        key: ApiKeyData,
        data: Self::NewData,
    ) -> Result<(), Self::Error>;
    async fn disable_api_key(&self, key_id: Uuid) -> Result<(), Self::Error>;
}

#[derive(Clone)]
pub struct ApiKeyManager<STORE: ApiKeyStore> {
    pub store: STORE,
}

impl<STORE: ApiKeyStore> ApiKeyManager<STORE> {
    #[instrument(level = "DEBUG", skip(self, key))]
    pub async fn authenticate(&self, key: &str) -> Result<STORE::FetchData, STORE::Error> {
        let (api_key_id, hash) = decode_key(key)?;
        event!(Level::DEBUG, %api_key_id, "checking key");
        self.store
            .lookup_api_key(api_key_id, hash)
            .await?
            .ok_or_else(|| Error::UnknownApiKey.into())
    }
}
