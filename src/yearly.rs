use chrono::{Months, NaiveDate};

/// The `step`th yearly occurrence after `anchor`. A February 29 anchor
/// falls on February 28 in common years.
pub(crate) fn nth(anchor: NaiveDate, interval: u32, step: u32) -> Option<NaiveDate> {
    let months = interval.max(1).checked_mul(step)?.checked_mul(12)?;
    anchor.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn same_day_next_year() {
        assert_eq!(nth(ymd(2026, 7, 1), 1, 1), Some(ymd(2027, 7, 1)));
    }

    #[test]
    fn interval() {
        assert_eq!(nth(ymd(2026, 7, 1), 2, 3), Some(ymd(2032, 7, 1)));
    }

    #[test]
    fn leap_day() {
        assert_eq!(nth(ymd(2028, 2, 29), 1, 1), Some(ymd(2029, 2, 28)));
        assert_eq!(nth(ymd(2028, 2, 29), 1, 4), Some(ymd(2032, 2, 29)));
    }

    #[test]
    fn overflow_ends_the_series() {
        assert_eq!(nth(ymd(2026, 7, 1), u32::MAX, 2), None);
    }
}
