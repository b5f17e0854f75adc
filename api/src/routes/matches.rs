use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    self as db,
    category::CategoryFilter,
    match_events::MatchEvent,
    match_lineups,
    match_stats::{self, MatchStats},
    matches::{self, Match},
    object_id::{LeagueId, MatchEventId, MatchId, MatchStatsId, PlayerId, TeamId, TeamPositionId},
    search::search_terms,
    LineupRole, PoolExt,
};

use super::group_rows;
use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub category: Option<CategoryFilter>,
    #[serde(default)]
    pub live: bool,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchInput {
    #[serde(rename = "type")]
    pub category: String,
    pub team1: TeamId,
    pub team2: TeamId,
    pub league: LeagueId,
    #[serde(default)]
    pub score1: i32,
    #[serde(default)]
    pub score2: i32,
    #[serde(default)]
    pub has_commentary: bool,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub player1: Vec<TeamPositionId>,
    #[serde(default)]
    pub player2: Vec<TeamPositionId>,
    #[serde(default)]
    pub sub1: Vec<TeamPositionId>,
    #[serde(default)]
    pub sub2: Vec<TeamPositionId>,
}

impl Validate for MatchInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("type", &self.category)
            .max_length("type", &self.category, 10);
        errors.into_result()
    }
}

impl MatchInput {
    fn lineups(&self) -> Vec<(LineupRole, TeamPositionId)> {
        LineupRole::ALL
            .iter()
            .flat_map(|&role| {
                let ids = match role {
                    LineupRole::Starter1 => &self.player1,
                    LineupRole::Starter2 => &self.player2,
                    LineupRole::Sub1 => &self.sub1,
                    LineupRole::Sub2 => &self.sub2,
                };
                ids.iter().map(move |&id| (role, id))
            })
            .collect()
    }

    fn into_match(self, id: MatchId) -> Match {
        Match {
            id,
            team1_id: self.team1,
            team2_id: self.team2,
            league_id: self.league,
            category: self.category,
            score1: self.score1,
            score2: self.score2,
            has_commentary: self.has_commentary,
            date: self.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchStatsInput {
    pub name: String,
    #[serde(default)]
    pub first: i32,
    #[serde(default)]
    pub second: i32,
}

impl Validate for MatchStatsInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 40);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LineupEntry {
    pub player: PlayerRef,
    pub position: String,
}

#[derive(Debug, Serialize)]
pub struct EventOutput {
    pub id: MatchEventId,
    pub title: String,
    pub time: DateTime<Utc>,
    pub comment: Option<String>,
    pub minute: i64,
}

#[derive(Debug, Serialize)]
pub struct StatOutput {
    pub id: MatchStatsId,
    pub name: String,
    pub first: i32,
    pub second: i32,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub id: MatchId,
    #[serde(rename = "type")]
    pub category: String,
    pub team1: Option<TeamRef>,
    pub team2: Option<TeamRef>,
    pub score1: i32,
    pub score2: i32,
    pub has_commentary: bool,
    pub date: DateTime<Utc>,
    pub league: Option<String>,
    pub player1: Vec<LineupEntry>,
    pub player2: Vec<LineupEntry>,
    pub sub1: Vec<LineupEntry>,
    pub sub2: Vec<LineupEntry>,
    pub events: Vec<EventOutput>,
    pub stats: Vec<StatOutput>,
}

fn with_details(conn: &mut PgConnection, games: Vec<Match>) -> Result<Vec<MatchOutput>, Error> {
    use db::{leagues, match_events, players, team_positions, teams};

    let ids = games.iter().map(|m| m.id).collect::<Vec<_>>();
    let team_ids = games
        .iter()
        .flat_map(|m| [m.team1_id, m.team2_id])
        .collect::<Vec<_>>();
    let league_ids = games.iter().map(|m| m.league_id).collect::<Vec<_>>();

    let team_refs = teams::table
        .filter(teams::id.eq_any(&team_ids))
        .select((teams::id, teams::name, teams::logo))
        .load::<TeamRef>(conn)?
        .into_iter()
        .map(|t| (t.id, t))
        .collect::<HashMap<_, _>>();

    let league_names = leagues::table
        .filter(leagues::id.eq_any(&league_ids))
        .select((leagues::id, leagues::name))
        .load::<(LeagueId, String)>(conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();

    let lineup_rows = match_lineups::table
        .inner_join(team_positions::table.inner_join(players::table))
        .filter(match_lineups::match_id.eq_any(&ids))
        .order(players::name.asc())
        .select((
            match_lineups::match_id,
            match_lineups::role,
            players::id,
            players::name,
            team_positions::position,
        ))
        .load::<(MatchId, LineupRole, PlayerId, String, String)>(conn)?;
    let mut lineups = group_rows(
        lineup_rows
            .into_iter()
            .map(|(match_id, role, id, name, position)| {
                (
                    (match_id, role),
                    LineupEntry {
                        player: PlayerRef { id, name },
                        position,
                    },
                )
            })
            .collect(),
    );

    let events = match_events::table
        .filter(match_events::match_id.eq_any(&ids))
        .order(match_events::created.asc())
        .select(MatchEvent::as_select())
        .load::<MatchEvent>(conn)?;
    let mut events_by_match = group_rows(events.into_iter().map(|e| (e.match_id, e)).collect());

    let stats = match_stats::table
        .filter(match_stats::match_id.eq_any(&ids))
        .order(match_stats::name.asc())
        .select(MatchStats::as_select())
        .load::<MatchStats>(conn)?;
    let mut stats_by_match = group_rows(
        stats
            .into_iter()
            .map(|s| {
                (
                    s.match_id,
                    StatOutput {
                        id: s.id,
                        name: s.name,
                        first: s.first,
                        second: s.second,
                    },
                )
            })
            .collect(),
    );

    let output = games
        .into_iter()
        .map(|m| {
            let mut lineup = |role: LineupRole| lineups.remove(&(m.id, role)).unwrap_or_default();
            let events = events_by_match
                .remove(&m.id)
                .unwrap_or_default()
                .into_iter()
                .map(|e| EventOutput {
                    minute: e.minute(m.date),
                    id: e.id,
                    title: e.title,
                    time: e.created,
                    comment: e.comment,
                })
                .collect();

            MatchOutput {
                player1: lineup(LineupRole::Starter1),
                player2: lineup(LineupRole::Starter2),
                sub1: lineup(LineupRole::Sub1),
                sub2: lineup(LineupRole::Sub2),
                team1: team_refs.get(&m.team1_id).cloned(),
                team2: team_refs.get(&m.team2_id).cloned(),
                league: league_names.get(&m.league_id).cloned(),
                events,
                stats: stats_by_match.remove(&m.id).unwrap_or_default(),
                id: m.id,
                category: m.category,
                score1: m.score1,
                score2: m.score2,
                has_commentary: m.has_commentary,
                date: m.date,
            }
        })
        .collect();

    Ok(output)
}

fn load_match(conn: &mut PgConnection, id: MatchId) -> Result<MatchOutput, Error> {
    let game = matches::table
        .find(id)
        .select(Match::as_select())
        .first::<Match>(conn)?;

    with_details(conn, vec![game])?
        .pop()
        .ok_or(Error::NotFound)
}

async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, Error> {
    let terms = query.search.as_deref().map(search_terms).unwrap_or_default();

    let objects = state
        .db
        .interact(move |conn| {
            let mut q = matches::table.order(matches::date.desc()).into_boxed();

            if let Some(category) = query.category {
                q = db::filter_category!(q, matches::category, category);
            }

            if query.live {
                q = q.filter(matches::date.gt(matches::live_threshold(Utc::now())));
            }

            let q = matches::filter_by_names(conn, q, &terms)?;
            let games = q.load::<Match>(conn)?;
            with_details(conn, games)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn team_matches(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    use db::teams;

    let objects = state
        .db
        .interact(move |conn| {
            let team_ids = teams::table
                .filter(teams::name.eq(name))
                .select(teams::id)
                .load::<TeamId>(conn)?;

            let games = matches::table
                .filter(
                    matches::team1_id
                        .eq_any(team_ids.clone())
                        .or(matches::team2_id.eq_any(team_ids)),
                )
                .order(matches::date.desc())
                .select(Match::as_select())
                .load::<Match>(conn)?;

            with_details(conn, games)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> Result<impl IntoResponse, Error> {
    let game = state.db.interact(move |conn| load_match(conn, id)).await?;
    Ok((StatusCode::OK, Json(game)))
}

async fn create_match(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<MatchInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let id = MatchId::new();
    let lineups = body.lineups();
    let game = body.into_match(id);

    let output = state
        .db
        .transaction(move |conn| {
            diesel::insert_into(matches::table)
                .values(&game)
                .execute(conn)?;
            match_lineups::set_lineups(conn, id, &lineups)?;
            load_match(conn, id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output)))
}

async fn update_match(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<MatchId>,
    Json(body): Json<MatchInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let lineups = body.lineups();
    let game = body.into_match(id);

    let output = state
        .db
        .transaction(move |conn| {
            let updated = diesel::update(matches::table.find(id))
                .set(&game)
                .execute(conn)?;
            if updated == 0 {
                return Err(Error::NotFound);
            }

            match_lineups::set_lineups(conn, id, &lineups)?;
            load_match(conn, id)
        })
        .await?;

    Ok((StatusCode::OK, Json(output)))
}

async fn delete_match(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<MatchId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(matches, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_match_stats(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(match_id): Path<MatchId>,
    Json(body): Json<MatchStatsInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let stats = MatchStats {
        id: MatchStatsId::new(),
        match_id,
        name: body.name,
        first: body.first,
        second: body.second,
    };

    let stats = state
        .db
        .interact(move |conn| {
            diesel::insert_into(match_stats::table)
                .values(&stats)
                .execute(conn)?;
            Ok::<_, Error>(stats)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(stats)))
}

async fn delete_match_stats(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<MatchStatsId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(match_stats, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/team/:name", get(team_matches))
        .route(
            "/matches/:id",
            get(get_match).put(update_match).delete(delete_match),
        )
        .route("/matches/:id/stats", post(create_match_stats))
        .route("/match_stats/:id", delete(delete_match_stats))
}
