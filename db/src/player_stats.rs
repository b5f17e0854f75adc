use diesel::prelude::*;
use serde::Serialize;

use crate::{
    object_id::{PlayerSeasonId, PlayerStatId},
    schema::*,
};

pub use crate::schema::player_stats::*;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = player_stats)]
pub struct PlayerStat {
    pub id: PlayerStatId,
    #[serde(rename = "season")]
    pub player_season_id: PlayerSeasonId,
    pub name: String,
    pub value: i32,
}
