use diesel::prelude::*;

use crate::{object_id::PlayerId, schema::*};

pub use crate::schema::players::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = players)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: i32,
    pub height: i32,
    pub weight: f64,
    pub nationality: String,
    pub image: String,
}
