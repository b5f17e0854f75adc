use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use diesel::prelude::*;
use serde::Deserialize;

use sports_hub_db::{
    object_id::{PlayerId, TeamId, TeamPositionId},
    team_positions::{self, TeamPosition},
    PoolExt,
};

use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Deserialize)]
pub struct TeamPositionQuery {
    pub team: Option<TeamId>,
    pub player: Option<PlayerId>,
}

#[derive(Debug, Deserialize)]
pub struct TeamPositionInput {
    pub team: TeamId,
    pub player: PlayerId,
    pub position: String,
}

impl Validate for TeamPositionInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("position", &self.position)
            .max_length("position", &self.position, 20);
        errors.into_result()
    }
}

async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<TeamPositionQuery>,
) -> Result<impl IntoResponse, Error> {
    let objects = state
        .db
        .interact(move |conn| {
            let mut q = team_positions::table
                .select(TeamPosition::as_select())
                .into_boxed();

            if let Some(team) = query.team {
                q = q.filter(team_positions::team_id.eq(team));
            }
            if let Some(player) = query.player {
                q = q.filter(team_positions::player_id.eq(player));
            }

            q.load::<TeamPosition>(conn).map_err(Error::from)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<TeamPositionId>,
) -> Result<impl IntoResponse, Error> {
    let position = crate::get_object!(team_positions, state, TeamPosition, id).await?;
    Ok((StatusCode::OK, Json(position)))
}

async fn create_position(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<TeamPositionInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let position = TeamPosition {
        id: TeamPositionId::new(),
        team_id: body.team,
        player_id: body.player,
        position: body.position,
    };

    let position = state
        .db
        .interact(move |conn| {
            diesel::insert_into(team_positions::table)
                .values(&position)
                .execute(conn)?;
            Ok::<_, Error>(position)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(position)))
}

async fn delete_position(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<TeamPositionId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(team_positions, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/team_positions", get(list_positions).post(create_position))
        .route(
            "/team_positions/:id",
            get(get_position).delete(delete_position),
        )
}
