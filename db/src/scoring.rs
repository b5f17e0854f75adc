//! Counter increments used by the admin console. Every increment is a single
//! `UPDATE ... SET col = col + n` so concurrent clicks never lose an update.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    category::SportKind,
    object_id::{MatchId, MatchStatsId, PlayerStatId},
    schema::{match_stats, matches, player_stats},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team1 => "team1",
            Self::Team2 => "team2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreAmount {
    One,
    Two,
    Three,
}

impl ScoreAmount {
    pub const ALL: [ScoreAmount; 3] = [ScoreAmount::One, ScoreAmount::Two, ScoreAmount::Three];

    pub fn value(&self) -> i32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<i32> for ScoreAmount {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(other),
        }
    }
}

/// Which counter of a match stat to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatSide {
    First,
    Second,
}

/// The score buttons offered for a match of this kind. The increment itself accepts any amount.
pub fn score_menu(kind: SportKind) -> &'static [ScoreAmount] {
    match kind {
        SportKind::Football => &[ScoreAmount::One],
        SportKind::Other => &ScoreAmount::ALL,
    }
}

/// Add to one side's score. Returns false if the match doesn't exist.
pub fn increase_score(
    conn: &mut PgConnection,
    match_id: MatchId,
    side: TeamSide,
    amount: ScoreAmount,
) -> QueryResult<bool> {
    let target = matches::table.find(match_id);
    let n = amount.value();
    let updated = match side {
        TeamSide::Team1 => diesel::update(target)
            .set(matches::score1.eq(matches::score1 + n))
            .execute(conn)?,
        TeamSide::Team2 => diesel::update(target)
            .set(matches::score2.eq(matches::score2 + n))
            .execute(conn)?,
    };

    Ok(updated > 0)
}

/// Add one to a match stat counter. Returns false if the stat doesn't exist.
pub fn increase_match_stat(
    conn: &mut PgConnection,
    stat_id: MatchStatsId,
    side: StatSide,
) -> QueryResult<bool> {
    let target = match_stats::table.find(stat_id);
    let updated = match side {
        StatSide::First => diesel::update(target)
            .set(match_stats::first.eq(match_stats::first + 1))
            .execute(conn)?,
        StatSide::Second => diesel::update(target)
            .set(match_stats::second.eq(match_stats::second + 1))
            .execute(conn)?,
    };

    Ok(updated > 0)
}

/// Add one to a player stat. Returns false if the stat doesn't exist.
pub fn increase_player_stat(conn: &mut PgConnection, stat_id: PlayerStatId) -> QueryResult<bool> {
    let updated = diesel::update(player_stats::table.find(stat_id))
        .set(player_stats::value.eq(player_stats::value + 1))
        .execute(conn)?;

    Ok(updated > 0)
}
