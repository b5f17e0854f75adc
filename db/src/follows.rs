use diesel::prelude::*;

use crate::{
    object_id::{PlayerId, TeamId, UserId},
    schema::*,
};

pub use crate::schema::{user_follow_players, user_follow_teams};

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = user_follow_teams)]
pub struct UserFollowTeam {
    pub user_id: UserId,
    pub team_id: TeamId,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = user_follow_players)]
pub struct UserFollowPlayer {
    pub user_id: UserId,
    pub player_id: PlayerId,
}

/// Names of the teams a user follows, oldest follow first.
pub fn followed_team_names(conn: &mut PgConnection, user: UserId) -> QueryResult<Vec<String>> {
    user_follow_teams::table
        .inner_join(teams::table)
        .filter(user_follow_teams::user_id.eq(user))
        .order(user_follow_teams::created.asc())
        .select(teams::name)
        .load(conn)
}

/// Names of the players a user follows, oldest follow first.
pub fn followed_player_names(conn: &mut PgConnection, user: UserId) -> QueryResult<Vec<String>> {
    user_follow_players::table
        .inner_join(players::table)
        .filter(user_follow_players::user_id.eq(user))
        .order(user_follow_players::created.asc())
        .select(players::name)
        .load(conn)
}
