use chrono::{DateTime, Duration, Utc};
use diesel::{prelude::*, PgConnection};

use sports_hub_auth::api_key::ApiKeyData;
use sports_hub_db as db;

use db::object_id::UserId;

/// Keys issued without an explicit expiration last this long.
pub const DEFAULT_KEY_LIFETIME_DAYS: i64 = 365;

/// Create an API key for the user and store its hash. The returned data is the only
/// place the full key appears.
pub fn make_key(
    conn: &mut PgConnection,
    user_id: UserId,
    name: Option<&str>,
    expires: Option<DateTime<Utc>>,
) -> Result<ApiKeyData, diesel::result::Error> {
    let expires = expires.unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_KEY_LIFETIME_DAYS));
    let key = ApiKeyData::new(expires);

    // Fail with NotFound rather than a foreign key error.
    db::users::table
        .find(user_id)
        .select(db::users::id)
        .first::<UserId>(conn)?;

    let new_key = db::api_keys::ApiKey {
        api_key_id: key.api_key_id,
        prefix: key.prefix.clone(),
        hash: key.hash.as_bytes().to_vec(),
        user_id,
        name: name.unwrap_or("").to_string(),
        created: Utc::now(),
        expires: key.expires,
    };

    diesel::insert_into(db::api_keys::table)
        .values(&new_key)
        .execute(conn)?;

    Ok(key)
}
