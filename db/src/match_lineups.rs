use diesel::prelude::*;

use crate::{
    object_id::{MatchId, TeamPositionId},
    schema::*,
    LineupRole,
};

pub use crate::schema::match_lineups::*;

#[derive(Clone, Debug, Queryable, Insertable)]
#[diesel(table_name = match_lineups)]
pub struct MatchLineup {
    pub match_id: MatchId,
    pub team_position_id: TeamPositionId,
    pub role: LineupRole,
}

/// Replace every lineup slot of a match.
pub fn set_lineups(
    conn: &mut PgConnection,
    game: MatchId,
    entries: &[(LineupRole, TeamPositionId)],
) -> QueryResult<()> {
    diesel::delete(match_lineups::table.filter(match_lineups::match_id.eq(game)))
        .execute(conn)?;

    let rows = entries
        .iter()
        .map(|&(slot, position)| MatchLineup {
            match_id: game,
            team_position_id: position,
            role: slot,
        })
        .collect::<Vec<_>>();

    if !rows.is_empty() {
        diesel::insert_into(match_lineups::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}
