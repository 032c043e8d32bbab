use crate::event::Event;
use crate::expand::DateRange;
use crate::rule::RecurrenceRule;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    ymd(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

/// A one hour UTC event with id `evt`.
pub fn hour_long(start: NaiveDateTime, recurrence: RecurrenceRule) -> Event {
    Event::new("evt", "Meeting", start, Tz::UTC)
        .with_end(start + Duration::hours(1))
        .with_recurrence(recurrence)
}

pub fn utc_days(first: NaiveDate, last: NaiveDate) -> DateRange {
    DateRange::days(first, last, Tz::UTC)
}
