use diesel::prelude::*;
use serde::Serialize;

use crate::{
    object_id::{PlayerId, PlayerSeasonId},
    schema::*,
};

pub use crate::schema::player_seasons::*;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = player_seasons)]
pub struct PlayerSeason {
    pub id: PlayerSeasonId,
    #[serde(rename = "player")]
    pub player_id: PlayerId,
    pub season: String,
}
