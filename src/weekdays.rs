use chrono::Weekday;
use std::fmt;
use std::iter::FromIterator;

/// Weekdays in the order they are listed when rendered: Sunday first.
const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A set of weekdays used to pin weekly rules to specific days.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weekdays(u8);

impl Weekdays {
    pub const fn empty() -> Self {
        Weekdays(0)
    }

    /// Builds a set from day numbers where 0 is Sunday and 6 is Saturday.
    /// Numbers outside that range are dropped.
    pub fn from_numbers(numbers: impl IntoIterator<Item = u8>) -> Self {
        numbers
            .into_iter()
            .filter_map(|n| SUNDAY_FIRST.get(n as usize).copied())
            .collect()
    }

    pub fn numbers(&self) -> Vec<u8> {
        self.iter().map(|d| d.num_days_from_sunday() as u8).collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        SUNDAY_FIRST.iter().copied().filter(move |d| self.contains(*d))
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Weekdays::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Debug for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Three letter English abbreviation, e.g. `Mon`.
pub fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Two letter iCalendar day code, e.g. `MO`.
pub fn rrule_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

pub fn from_rrule_code(code: &str) -> Option<Weekday> {
    SUNDAY_FIRST
        .iter()
        .copied()
        .find(|d| rrule_code(*d).eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_sunday_based() {
        let days = Weekdays::from_numbers(vec![1, 3]);

        assert!(days.contains(Weekday::Mon));
        assert!(days.contains(Weekday::Wed));
        assert!(!days.contains(Weekday::Sun));
        assert_eq!(days.numbers(), vec![1, 3]);
    }

    #[test]
    fn out_of_range_numbers_are_dropped() {
        let days = Weekdays::from_numbers(vec![0, 7, 200]);
        assert_eq!(days.len(), 1);
        assert!(days.contains(Weekday::Sun));
    }

    #[test]
    fn iterates_sunday_first() {
        let days = Weekdays::empty()
            .with(Weekday::Sat)
            .with(Weekday::Sun)
            .with(Weekday::Tue);

        let ordered: Vec<_> = days.iter().collect();
        assert_eq!(ordered, vec![Weekday::Sun, Weekday::Tue, Weekday::Sat]);
    }

    #[test]
    fn rrule_codes() {
        assert_eq!(from_rrule_code("MO"), Some(Weekday::Mon));
        assert_eq!(from_rrule_code("su"), Some(Weekday::Sun));
        assert_eq!(from_rrule_code("1MO"), None);
        assert_eq!(from_rrule_code("XX"), None);
    }
}
