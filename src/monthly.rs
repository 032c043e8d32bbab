use chrono::{Months, NaiveDate};

/// The `step`th monthly occurrence after `anchor`.
///
/// Always measured from the anchor so a start on the 31st lands on the last
/// day of shorter months and returns to the 31st afterwards.
pub(crate) fn nth(anchor: NaiveDate, interval: u32, step: u32) -> Option<NaiveDate> {
    let months = interval.max(1).checked_mul(step)?;
    anchor.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn same_day_next_month() {
        assert_eq!(nth(ymd(2026, 1, 15), 1, 1), Some(ymd(2026, 2, 15)));
        assert_eq!(nth(ymd(2026, 1, 15), 1, 12), Some(ymd(2027, 1, 15)));
    }

    #[test]
    fn clamps_to_end_of_february() {
        assert_eq!(nth(ymd(2026, 1, 31), 1, 1), Some(ymd(2026, 2, 28)));
        assert_eq!(nth(ymd(2028, 1, 31), 1, 1), Some(ymd(2028, 2, 29)));
    }

    #[test]
    fn returns_to_anchor_day_after_clamping() {
        assert_eq!(nth(ymd(2026, 1, 31), 1, 2), Some(ymd(2026, 3, 31)));
        assert_eq!(nth(ymd(2026, 1, 31), 1, 3), Some(ymd(2026, 4, 30)));
    }

    #[test]
    fn interval() {
        assert_eq!(nth(ymd(2026, 11, 10), 3, 1), Some(ymd(2027, 2, 10)));
        assert_eq!(nth(ymd(2026, 11, 10), 3, 2), Some(ymd(2027, 5, 10)));
    }
}
