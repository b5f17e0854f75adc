use diesel::prelude::*;
use serde::Serialize;

use crate::{
    object_id::{PlayerId, TeamId, TeamPositionId},
    schema::*,
};

pub use crate::schema::team_positions::*;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = team_positions)]
pub struct TeamPosition {
    pub id: TeamPositionId,
    #[serde(rename = "team")]
    pub team_id: TeamId,
    #[serde(rename = "player")]
    pub player_id: PlayerId,
    pub position: String,
}
