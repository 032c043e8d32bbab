use crate::event::{Event, EventInstance};
use crate::expand::{generate_instances_with, DateRange, ExpandOptions};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A collection of events expanded together, e.g. everything one calendar
/// view shows. Events that do not repeat contribute no instances.
#[derive(Default)]
pub struct Set {
    events: Vec<Event>,
    options: ExpandOptions,
}

impl Set {
    pub fn new() -> Self {
        Set::default()
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn options(mut self, options: ExpandOptions) -> Self {
        self.options = options;
        self
    }

    /// Instances of every event in `range`, earliest first. Instances
    /// starting at the same time keep the order their events were added in.
    pub fn in_range(&self, range: &DateRange) -> Vec<EventInstance> {
        let mut min_heap: BinaryHeap<_> = self
            .events
            .iter()
            .map(|event| generate_instances_with(event, range, &self.options).into_iter())
            .enumerate()
            .filter_map(|(source, mut iter)| {
                iter.next()
                    .map(|head| Reverse(IterHolder { head, source, iter }))
            })
            .collect();

        let mut merged = Vec::new();
        while let Some(Reverse(IterHolder { head, source, mut iter })) = min_heap.pop() {
            if let Some(next) = iter.next() {
                min_heap.push(Reverse(IterHolder {
                    head: next,
                    source,
                    iter,
                }));
            }
            merged.push(head);
        }

        merged
    }
}

/// Holds the remaining instances of one event and the earliest of them
struct IterHolder<I: Iterator<Item = EventInstance>> {
    head: EventInstance,
    source: usize,
    iter: I,
}

impl<I: Iterator<Item = EventInstance>> IterHolder<I> {
    fn key(&self) -> (DateTime<Utc>, usize) {
        (self.head.start.with_timezone(&Utc), self.source)
    }
}

impl<I: Iterator<Item = EventInstance>> Eq for IterHolder<I> {}

impl<I: Iterator<Item = EventInstance>> PartialEq for IterHolder<I> {
    fn eq(&self, other: &Self) -> bool {
        self.key().eq(&other.key())
    }
}

impl<I: Iterator<Item = EventInstance>> PartialOrd for IterHolder<I> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: Iterator<Item = EventInstance>> Ord for IterHolder<I> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RecurrenceRule;
    use crate::test_helpers::*;
    use chrono_tz::Tz;

    #[test]
    fn merges_chronologically() {
        let mornings = hour_long(at(2026, 1, 15, 9, 0), RecurrenceRule::daily(1));
        let mut evenings = hour_long(at(2026, 1, 14, 18, 0), RecurrenceRule::daily(2));
        evenings.id = "evening".to_string();

        let set = Set::new().event(mornings).event(evenings);
        let merged = set.in_range(&utc_days(ymd(2026, 1, 15), ymd(2026, 1, 17)));

        let ids: Vec<_> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "evt-instance-0",
                "evt-instance-1",
                "evening-instance-1",
                "evt-instance-2",
            ]
        );
    }

    #[test]
    fn keeps_simultaneous_instances() {
        let first = hour_long(at(2026, 1, 15, 9, 0), RecurrenceRule::daily(1));
        let mut second = hour_long(at(2026, 1, 15, 9, 0), RecurrenceRule::weekly(1));
        second.id = "weekly".to_string();

        let set = Set::new().event(first).event(second);
        let merged = set.in_range(&utc_days(ymd(2026, 1, 15), ymd(2026, 1, 15)));

        let ids: Vec<_> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["evt-instance-0", "weekly-instance-0"]);
    }

    #[test]
    fn one_off_events_contribute_nothing() {
        let one_off = Event::new("once", "Dentist", at(2026, 1, 15, 9, 0), Tz::UTC);
        let set = Set::new().event(one_off);

        assert!(set.in_range(&utc_days(ymd(2026, 1, 1), ymd(2026, 1, 31))).is_empty());
    }

    #[test]
    fn shares_options() {
        let set = Set::new()
            .event(hour_long(at(2026, 1, 1, 9, 0), RecurrenceRule::daily(1)))
            .options(ExpandOptions { max_occurrences: 3 });

        assert_eq!(set.in_range(&utc_days(ymd(2026, 1, 1), ymd(2026, 12, 31))).len(), 3);
    }
}
