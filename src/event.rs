use crate::rule::RecurrenceRule;
use crate::tz_date_iterator::{resolve_local, Occurrence, TzDateIterator};
use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A calendar event as the host application stores it.
///
/// `start` and `end` are wall-clock times in `timezone`. The event is the
/// single source of truth for its series; instances are derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Minutes before the start at which to remind.
    #[serde(default)]
    pub reminders: Vec<i64>,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

fn default_timezone() -> Tz {
    Tz::UTC
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        timezone: Tz,
    ) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            start,
            end: None,
            timezone,
            all_day: false,
            location: String::new(),
            description: String::new(),
            color: None,
            reminders: Vec::new(),
            recurrence: RecurrenceRule::never(),
        }
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_recurrence(mut self, recurrence: RecurrenceRule) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn start_instant(&self) -> Option<DateTime<Tz>> {
        resolve_local(&self.timezone, self.start)
    }

    /// Length of the event; zero without an end or with an end before the start.
    pub fn duration(&self) -> Duration {
        let end = self.end.and_then(|end| resolve_local(&self.timezone, end));

        match (self.start_instant(), end) {
            (Some(start), Some(end)) if end > start => end - start,
            _ => Duration::zero(),
        }
    }

    /// Every occurrence of the series from the original start onward,
    /// ending where the rule's end condition says.
    pub fn occurrences(&self) -> impl Iterator<Item = Occurrence> {
        TzDateIterator::new(
            self.recurrence.frequency,
            self.recurrence.end,
            self.start,
            self.timezone,
        )
    }

    pub(crate) fn instance(
        &self,
        index: u32,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> EventInstance {
        EventInstance {
            id: format!("{}-instance-{}", self.id, index),
            parent_id: self.id.clone(),
            index,
            title: self.title.clone(),
            start,
            end,
            all_day: self.all_day,
            location: self.location.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            reminders: self.reminders.clone(),
        }
    }
}

/// One occurrence of a recurring [`Event`], built on demand for a query
/// window and never stored. Edits belong on the parent, found through
/// `parent_id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    pub id: String,
    pub parent_id: String,
    pub index: u32,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub all_day: bool,
    pub location: String,
    pub description: String,
    pub color: Option<String>,
    pub reminders: Vec<i64>,
}
