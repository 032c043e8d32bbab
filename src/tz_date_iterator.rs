use crate::rule::{End, Frequency};
use crate::{daily, monthly, weekly, yearly};
use chrono::{
    DateTime, Datelike as _, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone as _,
};
use chrono_tz::Tz;

/// One materialized occurrence of a recurring event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence {
    /// Position in the series; the original start is 0.
    pub index: u32,
    pub start: DateTime<Tz>,
}

/// Timezone Aware Date Iterator
///
/// Steps on the wall clock of `timezone`, so an occurrence at 09:00 stays at
/// 09:00 on both sides of a DST change. Stops once the end condition is met.
pub struct TzDateIterator {
    frequency: Frequency,
    end: End,
    timezone: Tz,
    anchor: NaiveDateTime,
    cursor: Option<NaiveDate>,
    steps: u32,
    emitted: u32,
}

impl TzDateIterator {
    pub fn new(frequency: Frequency, end: End, anchor: NaiveDateTime, timezone: Tz) -> Self {
        let cursor = match frequency {
            Frequency::Never => None,
            _ => Some(anchor.date()),
        };

        TzDateIterator {
            frequency,
            end: end.normalized(),
            timezone,
            anchor,
            cursor,
            steps: 0,
            emitted: 0,
        }
    }

    fn advance(&mut self, from: NaiveDate) -> Option<NaiveDate> {
        self.steps = self.steps.checked_add(1)?;
        let anchor = self.anchor.date();
        let interval = self.frequency.interval();

        match self.frequency {
            Frequency::Never => None,
            Frequency::Daily { .. } => daily::advance(from, interval),
            Frequency::Weekly { days, .. } => weekly::advance(anchor, from, interval, Some(days)),
            Frequency::Monthly { .. } => monthly::nth(anchor, interval, self.steps),
            Frequency::Yearly { .. } => yearly::nth(anchor, interval, self.steps),
        }
    }

    fn admits(&self, date: NaiveDate) -> bool {
        self.frequency
            .days()
            .map_or(true, |days| days.contains(date.weekday()))
    }
}

impl Iterator for TzDateIterator {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        loop {
            let date = self.cursor?;

            match self.end {
                End::Count(count) if self.emitted >= count => return None,
                End::Until(until) if date > until => {
                    self.cursor = None;
                    return None;
                }
                _ => {}
            }

            self.cursor = self.advance(date);

            if !self.admits(date) {
                continue;
            }

            let start = match resolve_local(&self.timezone, date.and_time(self.anchor.time())) {
                Some(start) => start,
                None => continue,
            };

            let index = self.emitted;
            self.emitted += 1;
            return Some(Occurrence { index, start });
        }
    }
}

/// Places a wall-clock time in `timezone`. Times skipped by a DST jump move
/// forward an hour; repeated times take the earlier instant.
pub(crate) fn resolve_local(timezone: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match timezone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => timezone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest(),
    }
}
