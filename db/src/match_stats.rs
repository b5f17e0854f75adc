use diesel::prelude::*;
use serde::Serialize;

use crate::{
    object_id::{MatchId, MatchStatsId},
    schema::*,
};

pub use crate::schema::match_stats::*;

/// A named pair of counters for a match. `first` belongs to team1, `second` to team2.
#[derive(Clone, Debug, Serialize, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = match_stats)]
pub struct MatchStats {
    pub id: MatchStatsId,
    #[serde(rename = "match")]
    pub match_id: MatchId,
    pub name: String,
    pub first: i32,
    pub second: i32,
}
