use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use sports_hub_auth::password::{self, check_login, new_hash};
use sports_hub_db::{self as db, object_id::UserId, users::NewUser, PoolExt};

use crate::{
    api_key::make_key,
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Serialize, Queryable, Selectable)]
#[diesel(table_name = db::users)]
pub struct UserOutput {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Validate for RegisterInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("username", &self.username)
            .max_length("username", &self.username, 150)
            .email("email", &self.email)
            .min_length("password", &self.password, password::MIN_LENGTH)
            .max_length("first_name", &self.first_name, 150)
            .max_length("last_name", &self.last_name, 150);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct TokenOutput {
    token: String,
    user: UserOutput,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let password_hash = new_hash(body.password.as_str())?;
    let new_user = NewUser {
        id: UserId::new(),
        username: body.username,
        email: body.email,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
    };

    let user = state
        .db
        .interact(move |conn| {
            diesel::insert_into(db::users::table)
                .values(&new_user)
                .returning(UserOutput::as_select())
                .get_result::<UserOutput>(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Look up the user and check the password. Unknown users and wrong passwords fail the same way.
async fn check_credentials(state: &AppState, input: LoginInput) -> Result<UserOutput, Error> {
    let LoginInput { username, password } = input;
    state
        .db
        .interact(move |conn| {
            let found = db::users::table
                .filter(db::users::username.eq(username))
                .select((UserOutput::as_select(), db::users::password_hash))
                .first::<(UserOutput, String)>(conn)
                .optional()?;

            // Hashing is slow, so it runs here on the blocking pool along with the query.
            check_login(password.as_str(), found.as_ref().map(|(_, hash)| hash.as_str()))?;
            found.map(|(user, _)| user).ok_or(Error::Unauthenticated)
        })
        .await
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(body): Json<LoginInput>,
) -> Result<impl IntoResponse, Error> {
    let user = check_credentials(&state, body).await?;
    state.sessions.create_session(&cookies, user.id).await?;
    Ok((StatusCode::OK, Json(user)))
}

async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse, Error> {
    state.sessions.delete_session(&cookies).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn token(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> Result<impl IntoResponse, Error> {
    let user = check_credentials(&state, body).await?;
    let user_id = user.id;
    let key = state
        .db
        .interact(move |conn| make_key(conn, user_id, Some("token"), None).map_err(Error::from))
        .await?;

    Ok((
        StatusCode::OK,
        Json(TokenOutput {
            token: key.key,
            user,
        }),
    ))
}

async fn me(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, Error> {
    let output = state
        .db
        .interact(move |conn| {
            db::users::table
                .find(user.user_id)
                .select(UserOutput::as_select())
                .first::<UserOutput>(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok((StatusCode::OK, Json(output)))
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/token", post(token))
        .route("/me", get(me))
}
