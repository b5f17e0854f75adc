use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

/// The slot a player fills in a match lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DbEnum, Serialize, Deserialize)]
#[ExistingTypePath = "crate::schema::sql_types::LineupRole"]
#[serde(rename_all = "lowercase")]
pub enum LineupRole {
    #[db_rename = "starter1"]
    Starter1,
    #[db_rename = "starter2"]
    Starter2,
    #[db_rename = "sub1"]
    Sub1,
    #[db_rename = "sub2"]
    Sub2,
}

impl LineupRole {
    pub const ALL: [LineupRole; 4] = [
        LineupRole::Starter1,
        LineupRole::Starter2,
        LineupRole::Sub1,
        LineupRole::Sub2,
    ];

    /// The key used for this slot in match payloads.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Starter1 => "player1",
            Self::Starter2 => "player2",
            Self::Sub1 => "sub1",
            Self::Sub2 => "sub2",
        }
    }
}
