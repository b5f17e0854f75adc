use diesel::prelude::*;
use serde::Serialize;

use crate::{object_id::TagId, schema::*};

pub use crate::schema::tags::*;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tags)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
