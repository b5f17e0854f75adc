use diesel::{prelude::*, upsert::excluded};
use serde::{Deserialize, Serialize};

use crate::{object_id::TeamId, schema::*};

pub use crate::schema::coaching_staff::*;

#[derive(Clone, Debug, Serialize, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = coaching_staff, primary_key(team_id))]
pub struct CoachingStaff {
    #[serde(skip)]
    pub team_id: TeamId,
    pub caretaker_manager: String,
    pub first_team_coach: String,
    pub assistant_coaches: String,
    pub goalkeeping_coach: String,
    pub fitness_coach: String,
    pub head_analysis: String,
    pub head_development: String,
}

/// The staff roles as they arrive in a request, before being attached to a team.
/// Roles left out of the request are stored empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoachingStaffInput {
    pub caretaker_manager: String,
    pub first_team_coach: String,
    pub assistant_coaches: String,
    pub goalkeeping_coach: String,
    pub fitness_coach: String,
    pub head_analysis: String,
    pub head_development: String,
}

impl CoachingStaffInput {
    pub fn for_team(self, team: TeamId) -> CoachingStaff {
        CoachingStaff {
            team_id: team,
            caretaker_manager: self.caretaker_manager,
            first_team_coach: self.first_team_coach,
            assistant_coaches: self.assistant_coaches,
            goalkeeping_coach: self.goalkeeping_coach,
            fitness_coach: self.fitness_coach,
            head_analysis: self.head_analysis,
            head_development: self.head_development,
        }
    }
}

/// Insert the team's staff, or replace the existing record. A team never has more than one.
pub fn upsert(conn: &mut PgConnection, staff: &CoachingStaff) -> QueryResult<usize> {
    diesel::insert_into(coaching_staff::table)
        .values(staff)
        .on_conflict(coaching_staff::team_id)
        .do_update()
        .set((
            coaching_staff::caretaker_manager.eq(excluded(coaching_staff::caretaker_manager)),
            coaching_staff::first_team_coach.eq(excluded(coaching_staff::first_team_coach)),
            coaching_staff::assistant_coaches.eq(excluded(coaching_staff::assistant_coaches)),
            coaching_staff::goalkeeping_coach.eq(excluded(coaching_staff::goalkeeping_coach)),
            coaching_staff::fitness_coach.eq(excluded(coaching_staff::fitness_coach)),
            coaching_staff::head_analysis.eq(excluded(coaching_staff::head_analysis)),
            coaching_staff::head_development.eq(excluded(coaching_staff::head_development)),
        ))
        .execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_attached_to_team() {
        let team = TeamId::new();
        let input: CoachingStaffInput =
            serde_json::from_str(r#"{"first_team_coach": "Someone"}"#).unwrap();
        let staff = input.for_team(team);
        assert_eq!(staff.team_id, team);
        assert_eq!(staff.first_team_coach, "Someone");
        assert_eq!(staff.caretaker_manager, "");
    }
}
