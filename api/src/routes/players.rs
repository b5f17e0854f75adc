use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    self as db,
    object_id::{PlayerId, PlayerSeasonId, PlayerStatId},
    player_seasons::{self, PlayerSeason},
    player_stats::{self, PlayerStat},
    players::{self, Player},
    search::{contains_pattern, search_terms},
    PoolExt,
};

use super::group_rows;
use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    pub age: i32,
    pub height: i32,
    pub weight: f64,
    pub nationality: String,
    #[serde(default)]
    pub image: String,
}

impl Validate for PlayerInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 100)
            .max_length("nationality", &self.nationality, 50);
        errors.into_result()
    }
}

impl PlayerInput {
    fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            age: self.age,
            height: self.height,
            weight: self.weight,
            nationality: self.nationality,
            image: self.image,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeasonInput {
    pub season: String,
}

impl Validate for SeasonInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("season", &self.season)
            .max_length("season", &self.season, 50);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct StatInput {
    pub name: String,
    #[serde(default)]
    pub value: i32,
}

impl Validate for StatInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 100);
        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct TeamLink {
    pub team: String,
    pub position: String,
}

#[derive(Debug, Serialize)]
pub struct StatValue {
    pub id: PlayerStatId,
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Serialize)]
pub struct SeasonStats {
    pub id: PlayerSeasonId,
    pub season: String,
    pub stats: Vec<StatValue>,
}

#[derive(Debug, Serialize)]
pub struct PlayerOutput {
    pub id: PlayerId,
    pub name: String,
    pub age: i32,
    pub height: i32,
    pub weight: f64,
    pub nationality: String,
    pub image: String,
    pub teams: Vec<TeamLink>,
    pub stats: Vec<SeasonStats>,
}

fn with_details(
    conn: &mut PgConnection,
    players: Vec<Player>,
) -> Result<Vec<PlayerOutput>, Error> {
    use db::{team_positions, teams};

    let ids = players.iter().map(|p| p.id).collect::<Vec<_>>();

    let team_rows = team_positions::table
        .inner_join(teams::table)
        .filter(team_positions::player_id.eq_any(&ids))
        .order(teams::name.asc())
        .select((team_positions::player_id, teams::name, team_positions::position))
        .load::<(PlayerId, String, String)>(conn)?;
    let mut teams_by_player = group_rows(
        team_rows
            .into_iter()
            .map(|(player_id, team, position)| (player_id, TeamLink { team, position }))
            .collect(),
    );

    let seasons = player_seasons::table
        .filter(player_seasons::player_id.eq_any(&ids))
        .order(player_seasons::season.asc())
        .select(PlayerSeason::as_select())
        .load::<PlayerSeason>(conn)?;
    let season_ids = seasons.iter().map(|s| s.id).collect::<Vec<_>>();

    let stats = player_stats::table
        .filter(player_stats::player_season_id.eq_any(&season_ids))
        .order(player_stats::name.asc())
        .select(PlayerStat::as_select())
        .load::<PlayerStat>(conn)?;
    let mut stats_by_season = group_rows(
        stats
            .into_iter()
            .map(|s| {
                (
                    s.player_season_id,
                    StatValue {
                        id: s.id,
                        name: s.name,
                        value: s.value,
                    },
                )
            })
            .collect(),
    );

    let mut seasons_by_player = group_rows(
        seasons
            .into_iter()
            .map(|s| {
                (
                    s.player_id,
                    SeasonStats {
                        stats: stats_by_season.remove(&s.id).unwrap_or_default(),
                        id: s.id,
                        season: s.season,
                    },
                )
            })
            .collect(),
    );

    let output = players
        .into_iter()
        .map(|p| PlayerOutput {
            teams: teams_by_player.remove(&p.id).unwrap_or_default(),
            stats: seasons_by_player.remove(&p.id).unwrap_or_default(),
            id: p.id,
            name: p.name,
            age: p.age,
            height: p.height,
            weight: p.weight,
            nationality: p.nationality,
            image: p.image,
        })
        .collect();

    Ok(output)
}

fn load_player(conn: &mut PgConnection, id: PlayerId) -> Result<PlayerOutput, Error> {
    let player = players::table
        .find(id)
        .select(Player::as_select())
        .first::<Player>(conn)?;

    with_details(conn, vec![player])?
        .pop()
        .ok_or(Error::NotFound)
}

async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<impl IntoResponse, Error> {
    let terms = query.search.as_deref().map(search_terms).unwrap_or_default();

    let objects = state
        .db
        .interact(move |conn| {
            let mut q = players::table
                .select(Player::as_select())
                .order(players::name.asc())
                .into_boxed();

            for term in terms {
                q = q.filter(players::name.ilike(contains_pattern(&term)));
            }

            let players = q.load::<Player>(conn)?;
            with_details(conn, players)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> Result<impl IntoResponse, Error> {
    let player = state.db.interact(move |conn| load_player(conn, id)).await?;
    Ok((StatusCode::OK, Json(player)))
}

async fn create_player(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<PlayerInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;
    let id = PlayerId::new();
    let player = body.into_player(id);

    let output = state
        .db
        .interact(move |conn| {
            diesel::insert_into(players::table)
                .values(&player)
                .execute(conn)?;
            load_player(conn, id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output)))
}

async fn update_player(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<PlayerId>,
    Json(body): Json<PlayerInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;
    let player = body.into_player(id);

    crate::update_object!(players, state, id, player).await?;
    let output = state.db.interact(move |conn| load_player(conn, id)).await?;
    Ok((StatusCode::OK, Json(output)))
}

async fn delete_player(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<PlayerId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(players, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_season(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(player_id): Path<PlayerId>,
    Json(body): Json<SeasonInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let season = PlayerSeason {
        id: PlayerSeasonId::new(),
        player_id,
        season: body.season,
    };

    let season = state
        .db
        .interact(move |conn| {
            diesel::insert_into(player_seasons::table)
                .values(&season)
                .execute(conn)?;
            Ok::<_, Error>(season)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(season)))
}

async fn delete_season(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<PlayerSeasonId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(player_seasons, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_stat(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(season_id): Path<PlayerSeasonId>,
    Json(body): Json<StatInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let stat = PlayerStat {
        id: PlayerStatId::new(),
        player_season_id: season_id,
        name: body.name,
        value: body.value,
    };

    let stat = state
        .db
        .interact(move |conn| {
            diesel::insert_into(player_stats::table)
                .values(&stat)
                .execute(conn)?;
            Ok::<_, Error>(stat)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(stat)))
}

async fn delete_stat(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<PlayerStatId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(player_stats, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/players/:id/seasons", post(create_season))
        .route("/player_seasons/:id", delete(delete_season))
        .route("/player_seasons/:id/stats", post(create_stat))
        .route("/player_stats/:id", delete(delete_stat))
}
