use chrono::{DateTime, Utc};
use clap::Args;
use diesel::{Connection, PgConnection};

use sports_hub_db::object_id::UserId;

#[derive(Debug, Args)]
pub struct MakeApiKeyArgs {
    #[clap(short, long, help = "The user that owns the API key", env = "USER_ID")]
    user: UserId,
    #[clap(short, long, help = "Database connection string", env = "DATABASE_URL")]
    database: String,
    #[clap(short, long, help = "When the API key will expire")]
    expires: Option<DateTime<Utc>>,
    #[clap(name = "desc", long, help = "A description for the API key")]
    description: Option<String>,
}

pub fn main(args: MakeApiKeyArgs) -> Result<(), eyre::Report> {
    let mut conn = PgConnection::establish(args.database.as_str())?;
    let key = sports_hub_api::api_key::make_key(
        &mut conn,
        args.user,
        args.description.as_deref(),
        args.expires,
    )?;

    println!("Key ID: {}", key.api_key_id);
    println!("Key: {}", key.key);
    Ok(())
}
