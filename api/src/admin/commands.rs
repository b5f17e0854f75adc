//! Per-row admin actions. Each table maps a URL suffix to a typed action, and
//! [command_routes] turns a table into GET and POST routes that apply the action
//! and redirect back to the list page.

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use diesel::{PgConnection, QueryResult};
use serde::de::DeserializeOwned;

use sports_hub_db::{
    object_id::{MatchId, MatchStatsId, PlayerStatId},
    scoring::{self, ScoreAmount, StatSide, TeamSide},
    PoolExt,
};

use crate::{auth::Authenticated, shared_state::AppState, Error};

pub trait AdminCommand: Copy + Send + Sync + 'static {
    type Id: DeserializeOwned + Send + 'static;

    /// Used in the error when the target row doesn't exist.
    const OBJECT_NAME: &'static str;

    /// Returns false if there was no row to apply the command to.
    fn apply(&self, conn: &mut PgConnection, id: Self::Id) -> QueryResult<bool>;
}

#[derive(Debug, Clone, Copy)]
pub struct Command<A> {
    pub path: &'static str,
    pub label: &'static str,
    pub action: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCommand {
    pub side: TeamSide,
    pub amount: ScoreAmount,
}

impl AdminCommand for MatchCommand {
    type Id = MatchId;
    const OBJECT_NAME: &'static str = "match";

    fn apply(&self, conn: &mut PgConnection, id: MatchId) -> QueryResult<bool> {
        scoring::increase_score(conn, id, self.side, self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStatCommand(pub StatSide);

impl AdminCommand for MatchStatCommand {
    type Id = MatchStatsId;
    const OBJECT_NAME: &'static str = "match stat";

    fn apply(&self, conn: &mut PgConnection, id: MatchStatsId) -> QueryResult<bool> {
        scoring::increase_match_stat(conn, id, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStatCommand;

impl AdminCommand for PlayerStatCommand {
    type Id = PlayerStatId;
    const OBJECT_NAME: &'static str = "player stat";

    fn apply(&self, conn: &mut PgConnection, id: PlayerStatId) -> QueryResult<bool> {
        scoring::increase_player_stat(conn, id)
    }
}

const fn score(
    path: &'static str,
    label: &'static str,
    side: TeamSide,
    amount: ScoreAmount,
) -> Command<MatchCommand> {
    Command {
        path,
        label,
        action: MatchCommand { side, amount },
    }
}

pub const MATCH_COMMANDS: [Command<MatchCommand>; 6] = [
    score("increase_score/team1/1", "Team 1 +1", TeamSide::Team1, ScoreAmount::One),
    score("increase_score/team1/2", "Team 1 +2", TeamSide::Team1, ScoreAmount::Two),
    score("increase_score/team1/3", "Team 1 +3", TeamSide::Team1, ScoreAmount::Three),
    score("increase_score/team2/1", "Team 2 +1", TeamSide::Team2, ScoreAmount::One),
    score("increase_score/team2/2", "Team 2 +2", TeamSide::Team2, ScoreAmount::Two),
    score("increase_score/team2/3", "Team 2 +3", TeamSide::Team2, ScoreAmount::Three),
];

pub const MATCH_STAT_COMMANDS: [Command<MatchStatCommand>; 2] = [
    Command {
        path: "increase_first",
        label: "First +1",
        action: MatchStatCommand(StatSide::First),
    },
    Command {
        path: "increase_second",
        label: "Second +1",
        action: MatchStatCommand(StatSide::Second),
    },
];

pub const PLAYER_STAT_COMMANDS: [Command<PlayerStatCommand>; 1] = [Command {
    path: "increase",
    label: "+1",
    action: PlayerStatCommand,
}];

pub async fn run_command<A: AdminCommand>(
    state: &AppState,
    action: A,
    id: A::Id,
) -> Result<(), Error> {
    let applied = state
        .db
        .interact(move |conn| action.apply(conn, id).map_err(Error::from))
        .await?;

    if applied {
        Ok(())
    } else {
        Err(Error::ObjectNotFound(A::OBJECT_NAME))
    }
}

/// Routes of the form `{prefix}/:id/{command path}` for every command in the table.
/// Both GET and POST apply the command, then redirect to `redirect_to`.
pub fn command_routes<A: AdminCommand>(
    prefix: &str,
    commands: &[Command<A>],
    redirect_to: &'static str,
) -> Router<AppState> {
    let mut router = Router::new();
    for command in commands {
        let action = command.action;
        let handler = move |State(state): State<AppState>,
                            Authenticated(_user): Authenticated,
                            Path(id): Path<A::Id>| async move {
            run_command(&state, action, id).await?;
            Ok::<_, Error>(Redirect::to(redirect_to))
        };

        router = router.route(
            &format!("{prefix}/:id/{}", command.path),
            get(handler.clone()).post(handler),
        );
    }

    router
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn six_distinct_score_routes() {
        let paths = MATCH_COMMANDS
            .iter()
            .map(|c| c.path)
            .collect::<HashSet<_>>();
        assert_eq!(paths.len(), 6);

        for command in &MATCH_COMMANDS {
            let expected = format!(
                "increase_score/{}/{}",
                command.action.side.as_str(),
                command.action.amount.value()
            );
            assert_eq!(command.path, expected);
        }
    }

    #[test]
    fn every_side_and_amount_covered() {
        for side in [TeamSide::Team1, TeamSide::Team2] {
            for amount in ScoreAmount::ALL {
                assert!(MATCH_COMMANDS
                    .iter()
                    .any(|c| c.action == MatchCommand { side, amount }));
            }
        }
    }

    #[test]
    fn stat_commands_target_each_side() {
        assert_eq!(MATCH_STAT_COMMANDS[0].action, MatchStatCommand(StatSide::First));
        assert_eq!(MATCH_STAT_COMMANDS[1].action, MatchStatCommand(StatSide::Second));
        assert_eq!(PLAYER_STAT_COMMANDS.len(), 1);
    }
}
