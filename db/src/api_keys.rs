use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{object_id::UserId, schema::*};

pub use crate::schema::api_keys::*;

#[derive(Clone, Debug, Queryable, Identifiable, Insertable)]
#[diesel(table_name = api_keys, primary_key(api_key_id))]
pub struct ApiKey {
    pub api_key_id: Uuid,
    pub prefix: String,
    pub hash: Vec<u8>,
    pub user_id: UserId,
    pub name: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}
