use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    self as db,
    coaching_staff::{self, CoachingStaff, CoachingStaffInput},
    leagues::league_teams,
    object_id::{LeagueId, PlayerId, TeamId},
    search::{contains_pattern, search_terms},
    teams::{self, Team},
    PoolExt,
};

use super::{group_rows, CategoryQuery};
use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub leagues: Vec<LeagueId>,
    pub coaching_staff: Option<CoachingStaffInput>,
}

impl Validate for TeamInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 50)
            .required("type", &self.category)
            .max_length("type", &self.category, 10);

        if let Some(staff) = &self.coaching_staff {
            let short_fields = [
                ("caretaker_manager", &staff.caretaker_manager),
                ("first_team_coach", &staff.first_team_coach),
                ("goalkeeping_coach", &staff.goalkeeping_coach),
                ("fitness_coach", &staff.fitness_coach),
                ("head_analysis", &staff.head_analysis),
                ("head_development", &staff.head_development),
            ];
            for (field, value) in short_fields {
                errors.max_length(field, value, 30);
            }
            errors.max_length("assistant_coaches", &staff.assistant_coaches, 200);
        }

        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub player: PlayerRef,
    pub position: String,
}

/// Coaching staff as shown on a team. Every field is null when the team has no staff record.
#[derive(Debug, Default, Serialize)]
pub struct CoachingStaffOutput {
    pub caretaker_manager: Option<String>,
    pub first_team_coach: Option<String>,
    pub assistant_coaches: Option<String>,
    pub goalkeeping_coach: Option<String>,
    pub fitness_coach: Option<String>,
    pub head_analysis: Option<String>,
    pub head_development: Option<String>,
}

impl From<Option<CoachingStaff>> for CoachingStaffOutput {
    fn from(staff: Option<CoachingStaff>) -> Self {
        match staff {
            Some(s) => CoachingStaffOutput {
                caretaker_manager: Some(s.caretaker_manager),
                first_team_coach: Some(s.first_team_coach),
                assistant_coaches: Some(s.assistant_coaches),
                goalkeeping_coach: Some(s.goalkeeping_coach),
                fitness_coach: Some(s.fitness_coach),
                head_analysis: Some(s.head_analysis),
                head_development: Some(s.head_development),
            },
            None => CoachingStaffOutput::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamOutput {
    pub id: TeamId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub logo: String,
    pub players: Vec<RosterEntry>,
    pub leagues: Vec<String>,
    pub coaching_staff: CoachingStaffOutput,
}

fn with_details(conn: &mut PgConnection, teams: Vec<Team>) -> Result<Vec<TeamOutput>, Error> {
    use db::{leagues, players, team_positions};

    let ids = teams.iter().map(|t| t.id).collect::<Vec<_>>();

    let roster_rows = team_positions::table
        .inner_join(players::table)
        .filter(team_positions::team_id.eq_any(&ids))
        .order(players::name.asc())
        .select((
            team_positions::team_id,
            players::id,
            players::name,
            team_positions::position,
        ))
        .load::<(TeamId, PlayerId, String, String)>(conn)?;
    let mut roster = group_rows(
        roster_rows
            .into_iter()
            .map(|(team_id, id, name, position)| {
                (
                    team_id,
                    RosterEntry {
                        player: PlayerRef { id, name },
                        position,
                    },
                )
            })
            .collect(),
    );

    let league_rows = league_teams::table
        .inner_join(leagues::table)
        .filter(league_teams::team_id.eq_any(&ids))
        .order(leagues::name.asc())
        .select((league_teams::team_id, leagues::name))
        .load::<(TeamId, String)>(conn)?;
    let mut league_names = group_rows(league_rows);

    let staff_rows = coaching_staff::table
        .filter(coaching_staff::team_id.eq_any(&ids))
        .select(CoachingStaff::as_select())
        .load::<CoachingStaff>(conn)?;
    let mut staff = staff_rows
        .into_iter()
        .map(|s| (s.team_id, s))
        .collect::<std::collections::HashMap<_, _>>();

    let output = teams
        .into_iter()
        .map(|t| TeamOutput {
            players: roster.remove(&t.id).unwrap_or_default(),
            leagues: league_names.remove(&t.id).unwrap_or_default(),
            coaching_staff: CoachingStaffOutput::from(staff.remove(&t.id)),
            id: t.id,
            name: t.name,
            category: t.category,
            logo: t.logo,
        })
        .collect();

    Ok(output)
}

fn load_team(conn: &mut PgConnection, id: TeamId) -> Result<TeamOutput, Error> {
    let team = teams::table
        .find(id)
        .select(Team::as_select())
        .first::<Team>(conn)?;

    with_details(conn, vec![team])?
        .pop()
        .ok_or(Error::NotFound)
}

/// Write the team row's dependents: league memberships and the coaching staff.
fn write_team_links(
    conn: &mut PgConnection,
    team_id: TeamId,
    leagues: &[LeagueId],
    staff: Option<CoachingStaffInput>,
) -> Result<(), Error> {
    teams::set_leagues(conn, team_id, leagues)?;

    match staff {
        Some(staff) => {
            coaching_staff::upsert(conn, &staff.for_team(team_id))?;
        }
        None => {
            diesel::delete(coaching_staff::table.find(team_id)).execute(conn)?;
        }
    }

    Ok(())
}

async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, Error> {
    let terms = query.search.as_deref().map(search_terms).unwrap_or_default();

    let objects = state
        .db
        .interact(move |conn| {
            let mut q = teams::table
                .select(Team::as_select())
                .order(teams::name.asc())
                .into_boxed();

            if let Some(category) = query.category {
                q = db::filter_category!(q, teams::category, category);
            }

            for term in terms {
                q = q.filter(teams::name.ilike(contains_pattern(&term)));
            }

            let teams = q.load::<Team>(conn)?;
            with_details(conn, teams)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<impl IntoResponse, Error> {
    let team = state.db.interact(move |conn| load_team(conn, id)).await?;
    Ok((StatusCode::OK, Json(team)))
}

async fn create_team(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<TeamInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let id = TeamId::new();
    let team = Team {
        id,
        name: body.name,
        category: body.category,
        logo: body.logo,
    };
    let leagues = body.leagues;
    let staff = body.coaching_staff;

    let output = state
        .db
        .transaction(move |conn| {
            diesel::insert_into(teams::table)
                .values(&team)
                .execute(conn)?;
            write_team_links(conn, id, &leagues, staff)?;
            load_team(conn, id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output)))
}

async fn update_team(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<TeamId>,
    Json(body): Json<TeamInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let team = Team {
        id,
        name: body.name,
        category: body.category,
        logo: body.logo,
    };
    let leagues = body.leagues;
    let staff = body.coaching_staff;

    let output = state
        .db
        .transaction(move |conn| {
            let updated = diesel::update(teams::table.find(id))
                .set(&team)
                .execute(conn)?;
            if updated == 0 {
                return Err(Error::NotFound);
            }

            write_team_links(conn, id, &leagues, staff)?;
            load_team(conn, id)
        })
        .await?;

    Ok((StatusCode::OK, Json(output)))
}

async fn delete_team(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<TeamId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(teams, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/:id",
            get(get_team).put(update_team).delete(delete_team),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_staff_serializes_as_nulls() {
        let value = serde_json::to_value(CoachingStaffOutput::from(None)).unwrap();
        let fields = value.as_object().unwrap();
        assert_eq!(fields.len(), 7);
        assert!(fields.values().all(|v| v.is_null()));
    }

    #[test]
    fn long_assistant_list_allowed() {
        let staff = CoachingStaffInput {
            caretaker_manager: String::new(),
            first_team_coach: String::new(),
            assistant_coaches: "a".repeat(200),
            goalkeeping_coach: String::new(),
            fitness_coach: "b".repeat(31),
            head_analysis: String::new(),
            head_development: String::new(),
        };
        let input = TeamInput {
            name: "Celtics".to_string(),
            category: "basketball".to_string(),
            logo: String::new(),
            leagues: vec![],
            coaching_staff: Some(staff),
        };

        let Err(Error::Validation(fields)) = input.validate() else {
            panic!("expected a validation error");
        };
        assert!(fields.contains_key("fitness_coach"));
        assert!(!fields.contains_key("assistant_coaches"));
    }
}
