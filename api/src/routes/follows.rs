use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    follows::{
        followed_player_names, followed_team_names, user_follow_players, user_follow_teams,
        UserFollowPlayer, UserFollowTeam,
    },
    object_id::{PlayerId, TeamId},
    PoolExt,
};

use crate::{auth::Authenticated, shared_state::AppState, Error};

#[derive(Debug, Deserialize)]
pub struct FollowTeamInput {
    pub team: TeamId,
}

#[derive(Debug, Deserialize)]
pub struct FollowPlayerInput {
    pub player: PlayerId,
}

#[derive(Debug, Serialize)]
pub struct FollowedTeam {
    pub team: String,
}

#[derive(Debug, Serialize)]
pub struct FollowedPlayer {
    pub player: String,
}

async fn list_teams(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, Error> {
    let names = state
        .db
        .interact(move |conn| followed_team_names(conn, user.user_id).map_err(Error::from))
        .await?;

    let output = names
        .into_iter()
        .map(|team| FollowedTeam { team })
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(output)))
}

async fn follow_team(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Json(body): Json<FollowTeamInput>,
) -> Result<impl IntoResponse, Error> {
    let follow = UserFollowTeam {
        user_id: user.user_id,
        team_id: body.team,
    };

    state
        .db
        .interact(move |conn| {
            diesel::insert_into(user_follow_teams::table)
                .values(&follow)
                .execute(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok(StatusCode::CREATED)
}

async fn unfollow_team(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, Error> {
    let deleted = state
        .db
        .interact(move |conn| {
            diesel::delete(user_follow_teams::table.find((user.user_id, team_id)))
                .execute(conn)
                .map_err(Error::from)
        })
        .await?;

    if deleted == 0 {
        return Err(Error::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_players(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> Result<impl IntoResponse, Error> {
    let names = state
        .db
        .interact(move |conn| followed_player_names(conn, user.user_id).map_err(Error::from))
        .await?;

    let output = names
        .into_iter()
        .map(|player| FollowedPlayer { player })
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(output)))
}

async fn follow_player(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Json(body): Json<FollowPlayerInput>,
) -> Result<impl IntoResponse, Error> {
    let follow = UserFollowPlayer {
        user_id: user.user_id,
        player_id: body.player,
    };

    state
        .db
        .interact(move |conn| {
            diesel::insert_into(user_follow_players::table)
                .values(&follow)
                .execute(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok(StatusCode::CREATED)
}

async fn unfollow_player(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(player_id): Path<PlayerId>,
) -> Result<impl IntoResponse, Error> {
    let deleted = state
        .db
        .interact(move |conn| {
            diesel::delete(user_follow_players::table.find((user.user_id, player_id)))
                .execute(conn)
                .map_err(Error::from)
        })
        .await?;

    if deleted == 0 {
        return Err(Error::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/user_teams", get(list_teams).post(follow_team))
        .route("/user_teams/:team_id", delete(unfollow_team))
        .route("/user_players", get(list_players).post(follow_player))
        .route("/user_players/:player_id", delete(unfollow_player))
}
