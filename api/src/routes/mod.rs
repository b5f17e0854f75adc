use std::{collections::HashMap, hash::Hash};

use axum::Router;
use serde::Deserialize;

use sports_hub_db::category::CategoryFilter;

use crate::shared_state::AppState;

mod comments;
mod follows;
mod health;
mod leagues;
mod matches;
mod news;
mod players;
mod tags;
mod team_positions;
mod teams;
mod users;

pub fn configure() -> Router<AppState> {
    let api = Router::new()
        .merge(health::configure())
        .merge(users::configure())
        .merge(tags::configure())
        .merge(news::configure())
        .merge(comments::configure())
        .merge(leagues::configure())
        .merge(teams::configure())
        .merge(team_positions::configure())
        .merge(players::configure())
        .merge(matches::configure())
        .merge(follows::configure());

    Router::new().nest("/api", api)
}

/// Query parameters shared by the team and league lists.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<CategoryFilter>,
    pub search: Option<String>,
}

/// Collect `(parent, child)` rows into a list of children per parent, keeping row order.
pub(crate) fn group_rows<K, V>(rows: Vec<(K, V)>) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash,
{
    let mut grouped: HashMap<K, Vec<V>> = HashMap::new();
    for (key, value) in rows {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_rows_keeps_order() {
        let grouped = group_rows(vec![(1, "a"), (2, "b"), (1, "c")]);
        assert_eq!(grouped[&1], vec!["a", "c"]);
        assert_eq!(grouped[&2], vec!["b"]);
    }
}
