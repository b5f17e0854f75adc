use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    self as db,
    leagues::{self, League},
    object_id::LeagueId,
    search::{contains_pattern, search_terms},
    PoolExt,
};

use super::CategoryQuery;
use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

fn default_ongoing() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LeagueInput {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default = "default_ongoing")]
    pub is_ongoing: bool,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub logo: String,
}

impl Validate for LeagueInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 30)
            .required("type", &self.category)
            .max_length("type", &self.category, 10);
        errors.into_result()
    }
}

impl LeagueInput {
    fn into_league(self, id: LeagueId) -> League {
        League {
            id,
            name: self.name,
            category: self.category,
            is_ongoing: self.is_ongoing,
            start_date: self.start_date,
            logo: self.logo,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeagueOutput {
    pub id: LeagueId,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub is_ongoing: bool,
    pub start_date: NaiveDate,
    pub logo: String,
}

impl From<League> for LeagueOutput {
    fn from(l: League) -> Self {
        LeagueOutput {
            display_name: l.display_name(),
            id: l.id,
            name: l.name,
            category: l.category,
            is_ongoing: l.is_ongoing,
            start_date: l.start_date,
            logo: l.logo,
        }
    }
}

async fn list_leagues(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, Error> {
    let terms = query.search.as_deref().map(search_terms).unwrap_or_default();

    let objects = state
        .db
        .interact(move |conn| {
            let mut q = leagues::table
                .select(League::as_select())
                .order((leagues::start_date.desc(), leagues::name.asc()))
                .into_boxed();

            if let Some(category) = query.category {
                q = db::filter_category!(q, leagues::category, category);
            }

            for term in terms {
                q = q.filter(leagues::name.ilike(contains_pattern(&term)));
            }

            q.load::<League>(conn).map_err(Error::from)
        })
        .await?
        .into_iter()
        .map(LeagueOutput::from)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> Result<impl IntoResponse, Error> {
    let league = crate::get_object!(leagues, state, League, id).await?;
    Ok((StatusCode::OK, Json(LeagueOutput::from(league))))
}

async fn create_league(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<LeagueInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;
    let league = body.into_league(LeagueId::new());

    let league = state
        .db
        .interact(move |conn| {
            diesel::insert_into(leagues::table)
                .values(&league)
                .execute(conn)?;
            Ok::<_, Error>(league)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LeagueOutput::from(league))))
}

async fn update_league(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<LeagueId>,
    Json(body): Json<LeagueInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;
    let league = body.into_league(id);
    let output = LeagueOutput::from(league.clone());

    crate::update_object!(leagues, state, id, league).await?;
    Ok((StatusCode::OK, Json(output)))
}

async fn delete_league(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<LeagueId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(leagues, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/leagues", get(list_leagues).post(create_league))
        .route(
            "/leagues/:id",
            get(get_league).put(update_league).delete(delete_league),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_has_display_name() {
        let league = League {
            id: LeagueId::new(),
            name: "NBA".to_string(),
            category: "basketball".to_string(),
            is_ongoing: true,
            start_date: NaiveDate::from_ymd_opt(2022, 10, 18).unwrap(),
            logo: String::new(),
        };
        let value = serde_json::to_value(LeagueOutput::from(league)).unwrap();
        assert_eq!(value["display_name"], "NBA2022");
        assert_eq!(value["type"], "basketball");
    }

    #[test]
    fn ongoing_by_default() {
        let input: LeagueInput = serde_json::from_value(serde_json::json!({
            "name": "Serie A",
            "type": "football",
            "start_date": "2023-08-19",
        }))
        .unwrap();
        assert!(input.is_ongoing);
    }
}
