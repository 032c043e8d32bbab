use chrono::{Days, NaiveDate};

/// The day `interval` days after `cursor`.
pub(crate) fn advance(cursor: NaiveDate, interval: u32) -> Option<NaiveDate> {
    cursor.checked_add_days(Days::new(u64::from(interval.max(1))))
}
