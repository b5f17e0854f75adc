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
    match_stats::{self, MatchStats},
    object_id::{MatchId, TeamId},
    search::{contains_pattern, search_terms},
    PoolExt,
};

use super::{
    commands::{command_routes, MATCH_STAT_COMMANDS},
    matches::{match_label, team_names},
    render,
};
use crate::{auth::Authenticated, shared_state::AppState, Error};

const STAT_LIST: &str = "/admin/match_stats";

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
    match_label: String,
    name: String,
    first: i32,
    second: i32,
    buttons: Vec<Button>,
}

#[derive(Debug, Serialize)]
struct StatListPage {
    stats: Vec<StatRow>,
    q: String,
}

/// Matches where either team's name contains `term`.
fn matches_with_team_like(conn: &mut PgConnection, term: &str) -> QueryResult<Vec<MatchId>> {
    use db::{matches, teams};

    let team_ids = teams::table
        .filter(teams::name.ilike(contains_pattern(term)))
        .select(teams::id)
        .load::<TeamId>(conn)?;

    matches::table
        .filter(
            matches::team1_id
                .eq_any(team_ids.clone())
                .or(matches::team2_id.eq_any(team_ids)),
        )
        .select(matches::id)
        .load::<MatchId>(conn)
}

async fn list_stats(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Query(query): Query<StatListQuery>,
) -> Result<impl IntoResponse, Error> {
    use db::matches;

    let terms = query.q.as_deref().map(search_terms).unwrap_or_default();

    let rows = state
        .db
        .interact(move |conn| {
            let mut q = match_stats::table
                .select(MatchStats::as_select())
                .order(match_stats::name.asc())
                .into_boxed();

            for term in terms {
                let match_ids = matches_with_team_like(conn, &term)?;
                q = q.filter(
                    match_stats::name
                        .ilike(contains_pattern(&term))
                        .or(match_stats::match_id.eq_any(match_ids)),
                );
            }

            let stats = q.load::<MatchStats>(conn)?;

            let match_ids = stats.iter().map(|s| s.match_id).collect::<Vec<_>>();
            let teams = matches::table
                .filter(matches::id.eq_any(&match_ids))
                .select((matches::id, matches::team1_id, matches::team2_id))
                .load::<(MatchId, TeamId, TeamId)>(conn)?;
            let team_ids = teams
                .iter()
                .flat_map(|&(_, team1, team2)| [team1, team2])
                .collect::<Vec<_>>();
            let names = team_names(conn, &team_ids)?;
            let labels = teams
                .into_iter()
                .map(|(id, team1, team2)| (id, match_label(&names, team1, team2)))
                .collect::<std::collections::HashMap<_, _>>();

            let rows = stats
                .into_iter()
                .map(|s| StatRow {
                    match_label: labels.get(&s.match_id).cloned().unwrap_or_default(),
                    buttons: MATCH_STAT_COMMANDS
                        .iter()
                        .map(|command| Button {
                            url: format!("{STAT_LIST}/{}/{}", s.id, command.path),
                            label: command.label,
                        })
                        .collect(),
                    name: s.name,
                    first: s.first,
                    second: s.second,
                })
                .collect::<Vec<_>>();

            Ok::<_, Error>(rows)
        })
        .await?;

    let page = StatListPage {
        stats: rows,
        q: query.q.unwrap_or_default(),
    };
    render(&state.templates.match_stats, &page)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/match_stats", get(list_stats))
        .merge(command_routes(
            "/match_stats",
            &MATCH_STAT_COMMANDS,
            STAT_LIST,
        ))
}
