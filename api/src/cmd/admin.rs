use clap::{Args, Subcommand};
use diesel::{prelude::*, PgConnection};

use sports_hub_db::{object_id, users::NewUser};

mod make_api_key;

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[clap(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an object ID
    ///
    /// This is useful for preparing seed data by hand.
    MakeId(MakeId),
    /// Hash a password
    HashPassword(HashPassword),
    /// Create a user that can log in to the admin console
    CreateUser(CreateUser),
    /// Create an API key for an existing user
    MakeApiKey(make_api_key::MakeApiKeyArgs),
}

#[derive(Debug, Args)]
pub struct MakeId {
    #[clap(subcommand)]
    command: IdType,
}

#[derive(Debug, Subcommand)]
enum IdType {
    Tag,
    News,
    Comment,
    League,
    Team,
    Player,
    TeamPosition,
    PlayerSeason,
    PlayerStat,
    Match,
    MatchEvent,
    MatchStats,
    User,
}

#[derive(Debug, Args)]
pub struct HashPassword {
    /// The password to hash
    password: String,
}

#[derive(Debug, Args)]
pub struct CreateUser {
    #[clap(long = "db", env = "DATABASE_URL")]
    database: String,
    #[clap(long)]
    username: String,
    #[clap(long)]
    email: String,
    #[clap(long, env = "NEW_USER_PASSWORD")]
    password: String,
    #[clap(long, default_value_t = String::new())]
    first_name: String,
    #[clap(long, default_value_t = String::new())]
    last_name: String,
}

pub fn admin_commands(cmd: AdminArgs) -> Result<(), eyre::Report> {
    match cmd.commands {
        Commands::MakeId(MakeId { command }) => make_id(command),
        Commands::HashPassword(HashPassword { password }) => hash_password(password)?,
        Commands::CreateUser(args) => create_user(args)?,
        Commands::MakeApiKey(args) => make_api_key::main(args)?,
    }

    Ok(())
}

fn make_id(id: IdType) {
    let id = match id {
        IdType::Tag => object_id::TagId::new().to_string(),
        IdType::News => object_id::NewsArticleId::new().to_string(),
        IdType::Comment => object_id::CommentId::new().to_string(),
        IdType::League => object_id::LeagueId::new().to_string(),
        IdType::Team => object_id::TeamId::new().to_string(),
        IdType::Player => object_id::PlayerId::new().to_string(),
        IdType::TeamPosition => object_id::TeamPositionId::new().to_string(),
        IdType::PlayerSeason => object_id::PlayerSeasonId::new().to_string(),
        IdType::PlayerStat => object_id::PlayerStatId::new().to_string(),
        IdType::Match => object_id::MatchId::new().to_string(),
        IdType::MatchEvent => object_id::MatchEventId::new().to_string(),
        IdType::MatchStats => object_id::MatchStatsId::new().to_string(),
        IdType::User => object_id::UserId::new().to_string(),
    };

    println!("{id}");
}

fn hash_password(password: String) -> Result<(), eyre::Report> {
    let hash = sports_hub_auth::password::new_hash(password.as_str())?;
    println!("{hash}");
    Ok(())
}

fn create_user(args: CreateUser) -> Result<(), eyre::Report> {
    let mut conn = PgConnection::establish(args.database.as_str())?;
    sports_hub_db::run_migrations(&mut conn).map_err(|e| eyre::eyre!(e))?;

    let user = NewUser {
        id: object_id::UserId::new(),
        username: args.username,
        email: args.email,
        password_hash: sports_hub_auth::password::new_hash(args.password.as_str())?,
        first_name: args.first_name,
        last_name: args.last_name,
    };

    diesel::insert_into(sports_hub_db::users::table)
        .values(&user)
        .execute(&mut conn)?;

    println!("Created user {} ({})", user.username, user.id);
    Ok(())
}
