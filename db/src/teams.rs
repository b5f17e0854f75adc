use diesel::prelude::*;

use crate::{
    leagues::LeagueTeam,
    object_id::{LeagueId, TeamId},
    schema::*,
};

pub use crate::schema::teams::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = teams)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub category: String,
    pub logo: String,
}

/// Replace the set of leagues a team belongs to.
pub fn set_leagues(conn: &mut PgConnection, team: TeamId, leagues: &[LeagueId]) -> QueryResult<()> {
    diesel::delete(league_teams::table.filter(league_teams::team_id.eq(team))).execute(conn)?;

    let rows = leagues
        .iter()
        .map(|&league_id| LeagueTeam {
            league_id,
            team_id: team,
        })
        .collect::<Vec<_>>();

    if !rows.is_empty() {
        diesel::insert_into(league_teams::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}
