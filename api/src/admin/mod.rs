//! The operator console: server-rendered HTML pages for live match updates.

use axum::{response::Html, Router};
use serde::Serialize;
use tower_cookies::{Cookie, Cookies};

use crate::{shared_state::AppState, Error};

pub mod commands;
mod match_stats;
mod matches;
mod player_stats;

const FLASH_COOKIE: &str = "flash";

/// Parsed page templates, built once at startup.
pub struct Templates {
    pub match_list: liquid::Template,
    pub add_event: liquid::Template,
    pub match_stats: liquid::Template,
    pub player_stats: liquid::Template,
}

impl Templates {
    pub fn new() -> Result<Templates, Error> {
        let parser = liquid::ParserBuilder::with_stdlib().build()?;

        Ok(Templates {
            match_list: parser.parse(include_str!("templates/match_list.liquid"))?,
            add_event: parser.parse(include_str!("templates/add_event.liquid"))?,
            match_stats: parser.parse(include_str!("templates/match_stats.liquid"))?,
            player_stats: parser.parse(include_str!("templates/player_stats.liquid"))?,
        })
    }
}

pub fn render<T: Serialize>(template: &liquid::Template, context: &T) -> Result<Html<String>, Error> {
    let globals = liquid::to_object(context)?;
    let page = template.render(&globals)?;
    Ok(Html(page))
}

/// A one-shot message shown on the next page load. The cookie only carries the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    EventAdded,
}

impl Flash {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EventAdded => "event_added",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::EventAdded => "Event added successfully",
        }
    }

    pub fn from_code(code: &str) -> Option<Flash> {
        match code {
            "event_added" => Some(Self::EventAdded),
            _ => None,
        }
    }
}

pub fn set_flash(cookies: &Cookies, flash: Flash) {
    let cookie = Cookie::build(FLASH_COOKIE, flash.code())
        .path("/admin")
        .http_only(true)
        .finish();
    cookies.add(cookie);
}

/// Read the pending flash message, if any, and clear it.
pub fn take_flash(cookies: &Cookies) -> Option<Flash> {
    let cookie = cookies.get(FLASH_COOKIE)?;
    cookies.remove(Cookie::build(FLASH_COOKIE, "").path("/admin").finish());
    Flash::from_code(cookie.value())
}

pub fn configure() -> Router<AppState> {
    let admin = Router::new()
        .merge(matches::configure())
        .merge(match_stats::configure())
        .merge(player_stats::configure());

    Router::new().nest("/admin", admin)
}
