use chrono::{Datelike, NaiveDate};
use diesel::prelude::*;

use crate::{
    object_id::{LeagueId, TeamId},
    schema::*,
};

pub use crate::schema::league_teams;
pub use crate::schema::leagues::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = leagues)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub category: String,
    pub is_ongoing: bool,
    pub start_date: NaiveDate,
    pub logo: String,
}

impl League {
    /// The league's name followed directly by the year it started, e.g. `Premier League2023`.
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.start_date)
    }
}

pub fn display_name(league_name: &str, started: NaiveDate) -> String {
    format!("{}{}", league_name, started.year())
}

#[derive(Clone, Debug, Queryable, Insertable)]
#[diesel(table_name = league_teams)]
pub struct LeagueTeam {
    pub league_id: LeagueId,
    pub team_id: TeamId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_appends_year() {
        let start = NaiveDate::from_ymd_opt(2023, 8, 11).unwrap();
        assert_eq!(display_name("Premier League", start), "Premier League2023");
    }
}
