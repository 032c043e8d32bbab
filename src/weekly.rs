use crate::weekdays::Weekdays;
use chrono::{Datelike as _, Days, NaiveDate};

const DAYS_IN_WEEK: u64 = 7;

/// The next weekly occurrence after `cursor`.
///
/// Without explicit `days` this is simply `interval` weeks later. With them,
/// the next listed weekday within the following seven days is taken as long
/// as it sits in a week aligned with `interval` counting from `anchor`;
/// otherwise the cursor jumps a full `interval` weeks ahead.
pub(crate) fn advance(
    anchor: NaiveDate,
    cursor: NaiveDate,
    interval: u32,
    days: Option<Weekdays>,
) -> Option<NaiveDate> {
    let interval = interval.max(1);
    let full_step = Days::new(DAYS_IN_WEEK * u64::from(interval));

    let days = match days {
        Some(days) if !days.is_empty() => days,
        _ => return cursor.checked_add_days(full_step),
    };

    for ahead in 1..=DAYS_IN_WEEK {
        let candidate = cursor.checked_add_days(Days::new(ahead))?;
        if days.contains(candidate.weekday()) && week_aligned(anchor, candidate, interval) {
            return Some(candidate);
        }
    }

    cursor.checked_add_days(full_step)
}

fn week_aligned(anchor: NaiveDate, candidate: NaiveDate, interval: u32) -> bool {
    let weeks = (candidate - anchor).num_days().div_euclid(DAYS_IN_WEEK as i64);
    weeks.rem_euclid(i64::from(interval)) == 0
}
