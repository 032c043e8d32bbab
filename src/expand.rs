use crate::event::{Event, EventInstance};
use crate::tz_date_iterator::resolve_local;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone as _, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{trace, warn};

/// Most occurrences a single expansion walks before giving up.
pub const MAX_OCCURRENCES: usize = 1000;

/// Window of time instances are wanted for. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange { from, to }
    }

    /// From the start of `first` to the end of `last`, as days in `timezone`.
    pub fn days(first: NaiveDate, last: NaiveDate, timezone: Tz) -> Self {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();

        DateRange {
            from: day_boundary(timezone, first, NaiveTime::default()),
            to: day_boundary(timezone, last, end_of_day),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

fn day_boundary(timezone: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let local = date.and_time(time);
    resolve_local(&timezone, local)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpandOptions {
    /// Occurrences walked per event, counted from the original start
    /// whether or not they fall in the window. Hitting it truncates quietly.
    pub max_occurrences: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            max_occurrences: MAX_OCCURRENCES,
        }
    }
}

/// Instances of `event` that start in `range`, or that started earlier and
/// are still running when it opens.
///
/// The original start is occurrence 0 and is included when it qualifies;
/// callers that also render the literal event must skip one of the two.
///
/// At most [`MAX_OCCURRENCES`] occurrences are walked, counted from the
/// original start rather than from `range.from`. An unending series that
/// began more than that many occurrences before the window yields nothing.
pub fn generate_instances(event: &Event, range: &DateRange) -> Vec<EventInstance> {
    generate_instances_with(event, range, &ExpandOptions::default())
}

pub fn generate_instances_with(
    event: &Event,
    range: &DateRange,
    options: &ExpandOptions,
) -> Vec<EventInstance> {
    if event.recurrence.is_never() {
        return Vec::new();
    }

    let duration = event.duration();
    let mut instances = Vec::new();
    let mut walked = 0;

    for occurrence in event.occurrences() {
        let start = occurrence.start;
        let start_utc = start.with_timezone(&Utc);
        if start_utc > range.to {
            break;
        }

        if walked == options.max_occurrences {
            warn!(
                event = %event.id,
                max = options.max_occurrences,
                "occurrence cap reached, truncating expansion"
            );
            break;
        }
        walked += 1;

        let end = match start.checked_add_signed(duration) {
            Some(end) => end,
            None => break,
        };
        let overlaps = duration > Duration::zero() && end.with_timezone(&Utc) > range.from;

        if start_utc >= range.from || overlaps {
            instances.push(event.instance(occurrence.index, start, end));
        }
    }

    trace!(
        event = %event.id,
        walked,
        instances = instances.len(),
        "expanded recurring event"
    );

    instances
}
