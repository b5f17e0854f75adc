use std::collections::HashMap;

use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use sports_hub_db::{
    self as db,
    category::{CategoryFilter, SportKind},
    match_events::{self, NewMatchEvent},
    matches::{self, Match},
    object_id::{MatchEventId, MatchId, TeamId},
    scoring::score_menu,
    search::search_terms,
    PoolExt,
};

use super::{
    commands::{command_routes, MATCH_COMMANDS},
    render, set_flash, take_flash,
};
use crate::{auth::Authenticated, shared_state::AppState, validation::FieldErrors, Error};

const MATCH_LIST: &str = "/admin/matches";

#[derive(Debug, Default, Deserialize)]
pub struct MatchListQuery {
    /// The filter form submits an empty value for "all categories".
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<CategoryFilter>,
    #[serde(default)]
    pub live: bool,
    pub q: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<CategoryFilter>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => CategoryFilter::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(v))
            .map(Some),
    }
}

#[derive(Debug, Serialize)]
struct ScoreButton {
    url: String,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct MatchRow {
    id: String,
    label: String,
    category: String,
    score1: i32,
    score2: i32,
    date: String,
    live: bool,
    score_buttons: Vec<ScoreButton>,
    add_event_url: String,
}

#[derive(Debug, Serialize)]
struct MatchListPage {
    flash: Option<&'static str>,
    matches: Vec<MatchRow>,
    category: Option<&'static str>,
    live: bool,
    q: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

impl EventForm {
    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors
            .required("title", &self.title)
            .max_length("title", &self.title, 30);
        errors
    }
}

/// Messages for each form field. Every field is always present so the template can
/// loop over it without checking.
#[derive(Debug, Default, Serialize)]
struct EventFormErrors {
    title: Vec<String>,
    comment: Vec<String>,
}

impl EventFormErrors {
    fn from_messages(errors: &FieldErrors) -> EventFormErrors {
        let field = |name: &str| errors.messages().get(name).cloned().unwrap_or_default();
        EventFormErrors {
            title: field("title"),
            comment: field("comment"),
        }
    }
}

#[derive(Debug, Serialize)]
struct AddEventPage<'a> {
    match_label: String,
    action_url: String,
    list_url: &'static str,
    form: &'a EventForm,
    errors: EventFormErrors,
}

/// Names for each team id, for labelling rows.
pub(super) fn team_names(
    conn: &mut PgConnection,
    ids: &[TeamId],
) -> QueryResult<HashMap<TeamId, String>> {
    use db::teams;

    teams::table
        .filter(teams::id.eq_any(ids))
        .select((teams::id, teams::name))
        .load::<(TeamId, String)>(conn)
        .map(|rows| rows.into_iter().collect())
}

/// "Team A - Team B"
pub(super) fn match_label(names: &HashMap<TeamId, String>, team1: TeamId, team2: TeamId) -> String {
    let name = |id: TeamId| names.get(&id).map(String::as_str).unwrap_or("?");
    format!("{} - {}", name(team1), name(team2))
}

fn score_buttons(game: &Match) -> Vec<ScoreButton> {
    let offered = score_menu(SportKind::classify(&game.category));
    MATCH_COMMANDS
        .iter()
        .filter(|command| offered.contains(&command.action.amount))
        .map(|command| ScoreButton {
            url: format!("{MATCH_LIST}/{}/{}", game.id, command.path),
            label: command.label,
        })
        .collect()
}

async fn list_matches(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    cookies: Cookies,
    Query(query): Query<MatchListQuery>,
) -> Result<impl IntoResponse, Error> {
    let terms = query.q.as_deref().map(search_terms).unwrap_or_default();
    let category = query.category;
    let live = query.live;

    let (games, names) = state
        .db
        .interact(move |conn| {
            let mut q = matches::table.order(matches::date.desc()).into_boxed();

            if let Some(category) = category {
                q = db::filter_category!(q, matches::category, category);
            }

            if live {
                q = q.filter(matches::date.gt(matches::live_threshold(Utc::now())));
            }

            let games = matches::filter_by_names(conn, q, &terms)?.load::<Match>(conn)?;
            let team_ids = games
                .iter()
                .flat_map(|m| [m.team1_id, m.team2_id])
                .collect::<Vec<_>>();
            let names = team_names(conn, &team_ids)?;
            Ok::<_, Error>((games, names))
        })
        .await?;

    let now = Utc::now();
    let rows = games
        .iter()
        .map(|game| MatchRow {
            id: game.id.to_string(),
            label: match_label(&names, game.team1_id, game.team2_id),
            category: game.category.clone(),
            score1: game.score1,
            score2: game.score2,
            date: game.date.format("%Y-%m-%d %H:%M").to_string(),
            live: matches::is_live(game.date, now),
            score_buttons: score_buttons(game),
            add_event_url: format!("{MATCH_LIST}/{}/add_event", game.id),
        })
        .collect();

    let page = MatchListPage {
        flash: take_flash(&cookies).map(|f| f.message()),
        matches: rows,
        category: query.category.map(|c| c.as_str()),
        live: query.live,
        q: query.q.unwrap_or_default(),
    };

    render(&state.templates.match_list, &page)
}

/// The "Team A - Team B" label of a match, or an error if it doesn't exist.
async fn find_match_label(state: &AppState, id: MatchId) -> Result<String, Error> {
    state
        .db
        .interact(move |conn| {
            let game = matches::table
                .find(id)
                .select(Match::as_select())
                .first::<Match>(conn)
                .optional()?
                .ok_or(Error::ObjectNotFound("match"))?;

            let names = team_names(conn, &[game.team1_id, game.team2_id])?;
            Ok::<_, Error>(match_label(&names, game.team1_id, game.team2_id))
        })
        .await
}

fn render_event_form(
    state: &AppState,
    id: MatchId,
    match_label: String,
    form: &EventForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let page = AddEventPage {
        match_label,
        action_url: format!("{MATCH_LIST}/{id}/add_event"),
        list_url: MATCH_LIST,
        form,
        errors: EventFormErrors::from_messages(errors),
    };

    Ok(render(&state.templates.add_event, &page)?.into_response())
}

async fn add_event_form(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<MatchId>,
) -> Result<Response, Error> {
    let label = find_match_label(&state, id).await?;
    render_event_form(&state, id, label, &EventForm::default(), &FieldErrors::new())
}

async fn add_event(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    cookies: Cookies,
    Path(id): Path<MatchId>,
    Form(form): Form<EventForm>,
) -> Result<Response, Error> {
    let label = find_match_label(&state, id).await?;

    let errors = form.errors();
    if !errors.is_empty() {
        return render_event_form(&state, id, label, &form, &errors);
    }

    let comment = Some(form.comment.trim().to_string()).filter(|c| !c.is_empty());
    let event = NewMatchEvent {
        id: MatchEventId::new(),
        match_id: id,
        title: form.title.trim().to_string(),
        comment,
    };

    state
        .db
        .interact(move |conn| {
            diesel::insert_into(match_events::table)
                .values(&event)
                .execute(conn)
                .map_err(Error::from)
        })
        .await?;

    set_flash(&cookies, super::Flash::EventAdded);
    Ok(Redirect::to(MATCH_LIST).into_response())
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/:id/add_event", get(add_event_form).post(add_event))
        .merge(command_routes("/matches", &MATCH_COMMANDS, MATCH_LIST))
}

#[cfg(test)]
mod tests {
    use axum::response::Html;
    use chrono::Utc;
    use sports_hub_db::object_id::LeagueId;

    use super::*;

    fn game(category: &str) -> Match {
        Match {
            id: MatchId::new(),
            team1_id: TeamId::new(),
            team2_id: TeamId::new(),
            league_id: LeagueId::new(),
            category: category.to_string(),
            score1: 0,
            score2: 0,
            has_commentary: false,
            date: Utc::now(),
        }
    }

    #[test]
    fn football_gets_single_point_buttons() {
        let game = game("football");
        let buttons = score_buttons(&game);
        assert_eq!(buttons.len(), 2);
        assert!(buttons[0].url.ends_with("/increase_score/team1/1"));
        assert!(buttons[1].url.ends_with("/increase_score/team2/1"));
    }

    #[test]
    fn basketball_gets_all_buttons() {
        let game = game("basketball");
        let buttons = score_buttons(&game);
        assert_eq!(buttons.len(), 6);
        assert!(buttons
            .iter()
            .all(|b| b.url.starts_with(&format!("/admin/matches/{}/", game.id))));
    }

    #[test]
    fn label_joins_team_names() {
        let (a, b) = (TeamId::new(), TeamId::new());
        let names = HashMap::from([(a, "Lakers".to_string()), (b, "Celtics".to_string())]);
        assert_eq!(match_label(&names, a, b), "Lakers - Celtics");
    }

    #[test]
    fn event_title_limits() {
        let form = EventForm {
            title: "x".repeat(31),
            comment: String::new(),
        };
        assert!(form.errors().messages().contains_key("title"));

        let form = EventForm {
            title: "Goal".to_string(),
            comment: String::new(),
        };
        assert!(form.errors().is_empty());

        assert!(EventForm::default().errors().messages().contains_key("title"));
    }

    #[test]
    fn empty_category_means_all() {
        let uri = "/admin/matches?category=&live=true".parse().unwrap();
        let Query(query) = Query::<MatchListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.category, None);
        assert!(query.live);

        let uri = "/admin/matches?category=basketball".parse().unwrap();
        let Query(query) = Query::<MatchListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.category, Some(CategoryFilter::Basketball));

        let uri = "/admin/matches?category=cricket".parse().unwrap();
        assert!(Query::<MatchListQuery>::try_from_uri(&uri).is_err());
    }

    fn event_page(form: &EventForm) -> String {
        let templates = crate::admin::Templates::new().unwrap();
        let page = AddEventPage {
            match_label: "Lakers - Celtics".to_string(),
            action_url: "/admin/matches/x/add_event".to_string(),
            list_url: MATCH_LIST,
            form,
            errors: EventFormErrors::from_messages(&form.errors()),
        };
        let Html(html) = render(&templates.add_event, &page).unwrap();
        html
    }

    #[test]
    fn event_form_renders_without_errors() {
        let form = EventForm {
            title: "Goal".to_string(),
            comment: String::new(),
        };
        let html = event_page(&form);
        assert!(html.contains("Lakers - Celtics"));
        assert!(html.contains("value=\"Goal\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn event_form_renders_title_error_only() {
        let form = EventForm {
            title: String::new(),
            comment: "kept".to_string(),
        };
        let html = event_page(&form);
        assert!(html.contains("This field is required."));
        assert!(html.contains(">kept</textarea>"));
        assert_eq!(html.matches("class=\"error\"").count(), 1);
    }

    #[test]
    fn match_list_renders() {
        let templates = crate::admin::Templates::new().unwrap();
        let game = game("football");
        let page = MatchListPage {
            flash: Some("Event added successfully"),
            matches: vec![MatchRow {
                id: game.id.to_string(),
                label: "Lakers - Celtics".to_string(),
                category: game.category.clone(),
                score1: 3,
                score2: 1,
                date: "2023-05-01 18:00".to_string(),
                live: true,
                score_buttons: score_buttons(&game),
                add_event_url: format!("/admin/matches/{}/add_event", game.id),
            }],
            category: None,
            live: false,
            q: String::new(),
        };

        let Html(html) = render(&templates.match_list, &page).unwrap();
        assert!(html.contains("Event added successfully"));
        assert!(html.contains("Lakers - Celtics"));
        assert!(html.contains("increase_score/team1/1"));
        assert!(!html.contains("increase_score/team1/2"));
        assert!(html.contains("Add Event"));
    }
}
