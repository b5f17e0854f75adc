use chrono::{DateTime, Duration, Utc};
use diesel::{pg::Pg, prelude::*};

use crate::{
    object_id::{LeagueId, MatchId, TeamId},
    schema::*,
    search::contains_pattern,
};

pub use crate::schema::matches::*;

/// How long after kickoff a match counts as live.
pub const LIVE_WINDOW_MINUTES: i64 = 120;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = matches)]
pub struct Match {
    pub id: MatchId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub league_id: LeagueId,
    pub category: String,
    pub score1: i32,
    pub score2: i32,
    pub has_commentary: bool,
    pub date: DateTime<Utc>,
}

/// Matches that started after this instant are live.
pub fn live_threshold(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(LIVE_WINDOW_MINUTES)
}

pub fn is_live(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    kickoff > live_threshold(now)
}

/// Narrow a match query to matches where every term appears in the name of team1,
/// team2 or the league.
pub fn filter_by_names<'a>(
    conn: &mut PgConnection,
    mut query: BoxedQuery<'a, Pg>,
    terms: &[String],
) -> QueryResult<BoxedQuery<'a, Pg>> {
    for term in terms {
        let pattern = contains_pattern(term);
        let team_ids = teams::table
            .filter(teams::name.ilike(&pattern))
            .select(teams::id)
            .load::<TeamId>(conn)?;
        let league_ids = leagues::table
            .filter(leagues::name.ilike(&pattern))
            .select(leagues::id)
            .load::<LeagueId>(conn)?;

        query = query.filter(
            matches::team1_id
                .eq_any(team_ids.clone())
                .or(matches::team2_id.eq_any(team_ids))
                .or(matches::league_id.eq_any(league_ids)),
        );
    }

    Ok(query)
}
