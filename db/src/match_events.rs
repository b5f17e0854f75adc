use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{
    object_id::{MatchEventId, MatchId},
    schema::*,
};

pub use crate::schema::match_events::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = match_events)]
pub struct MatchEvent {
    pub id: MatchEventId,
    pub match_id: MatchId,
    pub title: String,
    pub created: DateTime<Utc>,
    pub comment: Option<String>,
}

impl MatchEvent {
    pub fn minute(&self, match_date: DateTime<Utc>) -> i64 {
        elapsed_minute(self.created, match_date)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = match_events)]
pub struct NewMatchEvent {
    pub id: MatchEventId,
    pub match_id: MatchId,
    pub title: String,
    pub comment: Option<String>,
}

/// The minute shown next to an event. This only looks at the time within the hour,
/// so an event 75 minutes after kickoff displays as minute 15.
pub fn elapsed_minute(event_time: DateTime<Utc>, match_date: DateTime<Utc>) -> i64 {
    (event_time - match_date).num_seconds().rem_euclid(3600) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn minute_within_first_hour() {
        let start = Utc::now();
        let event = start + Duration::minutes(23) + Duration::seconds(40);
        assert_eq!(elapsed_minute(event, start), 23);
    }

    #[test]
    fn minute_wraps_after_an_hour() {
        let start = Utc::now();
        assert_eq!(elapsed_minute(start + Duration::minutes(75), start), 15);
        assert_eq!(elapsed_minute(start + Duration::minutes(60), start), 0);
    }

    #[test]
    fn minute_before_kickoff() {
        let start = Utc::now();
        assert_eq!(elapsed_minute(start - Duration::minutes(10), start), 50);
    }
}
