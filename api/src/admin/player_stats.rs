use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    self as db,
    object_id::{PlayerSeasonId, PlayerStatId},
    search::{contains_pattern, search_terms},
    PoolExt,
};

use super::{
    commands::{command_routes, PLAYER_STAT_COMMANDS},
    render,
};
use crate::{auth::Authenticated, shared_state::AppState, Error};

const STAT_LIST: &str = "/admin/player_stats";

#[derive(Debug, Default, Deserialize)]
pub struct StatListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
struct Button {
    url: String,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct StatRow {
    player: String,
    season: String,
    name: String,
    value: i32,
    buttons: Vec<Button>,
}

#[derive(Debug, Serialize)]
struct StatListPage {
    stats: Vec<StatRow>,
    q: String,
}

/// Seasons whose label or player name contains `term`.
fn seasons_like(conn: &mut PgConnection, term: &str) -> QueryResult<Vec<PlayerSeasonId>> {
    use db::{player_seasons, players};

    let pattern = contains_pattern(term);
    player_seasons::table
        .inner_join(players::table)
        .filter(
            players::name
                .ilike(pattern.clone())
                .or(player_seasons::season.ilike(pattern)),
        )
        .select(player_seasons::id)
        .load::<PlayerSeasonId>(conn)
}

async fn list_stats(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Query(query): Query<StatListQuery>,
) -> Result<impl IntoResponse, Error> {
    use db::{player_seasons, player_stats, players};

    let terms = query.q.as_deref().map(search_terms).unwrap_or_default();

    let rows = state
        .db
        .interact(move |conn| {
            let mut q = player_stats::table
                .inner_join(player_seasons::table.inner_join(players::table))
                .select((
                    player_stats::id,
                    players::name,
                    player_seasons::season,
                    player_stats::name,
                    player_stats::value,
                ))
                .order((players::name.asc(), player_seasons::season.asc()))
                .into_boxed();

            for term in terms {
                let seasons = seasons_like(conn, &term)?;
                q = q.filter(player_stats::player_season_id.eq_any(seasons));
            }

            let rows = q
                .load::<(PlayerStatId, String, String, String, i32)>(conn)?
                .into_iter()
                .map(|(id, player, season, name, value)| StatRow {
                    buttons: PLAYER_STAT_COMMANDS
                        .iter()
                        .map(|command| Button {
                            url: format!("{STAT_LIST}/{id}/{}", command.path),
                            label: command.label,
                        })
                        .collect(),
                    player,
                    season,
                    name,
                    value,
                })
                .collect::<Vec<_>>();

            Ok::<_, Error>(rows)
        })
        .await?;

    let page = StatListPage {
        stats: rows,
        q: query.q.unwrap_or_default(),
    };
    render(&state.templates.player_stats, &page)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/player_stats", get(list_stats))
        .merge(command_routes(
            "/player_stats",
            &PLAYER_STAT_COMMANDS,
            STAT_LIST,
        ))
}
