use crate::weekdays::Weekdays;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use tracing::debug;

/// How an event repeats and when it stops repeating.
///
/// Stored by the host application as a flat object
/// (`{frequency, interval, daysOfWeek, endCondition, endCount, endDate}`),
/// which is loaded forgivingly: anything that does not make sense for the
/// chosen frequency or end condition is dropped rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRule", into = "StoredRule")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub end: End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    Never,
    Daily { interval: u32 },
    /// An empty `days` repeats on the weekday of the original start.
    Weekly { interval: u32, days: Weekdays },
    Monthly { interval: u32 },
    Yearly { interval: u32 },
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Never
    }
}

impl Frequency {
    /// Interval with zero normalized to one.
    pub fn interval(&self) -> u32 {
        let interval = match *self {
            Frequency::Never => 1,
            Frequency::Daily { interval }
            | Frequency::Weekly { interval, .. }
            | Frequency::Monthly { interval }
            | Frequency::Yearly { interval } => interval,
        };
        interval.max(1)
    }

    /// Explicit weekdays of a weekly rule, if any were given.
    pub fn days(&self) -> Option<Weekdays> {
        match *self {
            Frequency::Weekly { days, .. } if !days.is_empty() => Some(days),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Frequency::Never => "never",
            Frequency::Daily { .. } => "daily",
            Frequency::Weekly { .. } => "weekly",
            Frequency::Monthly { .. } => "monthly",
            Frequency::Yearly { .. } => "yearly",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    Never,
    /// Total number of occurrences, the original one included. A count of
    /// zero means the same as `Never`.
    Count(u32),
    /// Last day on which an occurrence may start, inclusive.
    Until(NaiveDate),
}

impl Default for End {
    fn default() -> Self {
        End::Never
    }
}

impl End {
    /// `Count(0)` folded into `Never`.
    pub fn normalized(self) -> Self {
        match self {
            End::Count(0) => End::Never,
            end => end,
        }
    }
}

impl RecurrenceRule {
    pub const fn never() -> Self {
        RecurrenceRule {
            frequency: Frequency::Never,
            end: End::Never,
        }
    }

    pub fn daily(interval: u32) -> Self {
        Self::repeating(Frequency::Daily { interval })
    }

    pub fn weekly(interval: u32) -> Self {
        Self::repeating(Frequency::Weekly {
            interval,
            days: Weekdays::empty(),
        })
    }

    pub fn weekly_on(interval: u32, days: Weekdays) -> Self {
        Self::repeating(Frequency::Weekly { interval, days })
    }

    pub fn monthly(interval: u32) -> Self {
        Self::repeating(Frequency::Monthly { interval })
    }

    pub fn yearly(interval: u32) -> Self {
        Self::repeating(Frequency::Yearly { interval })
    }

    fn repeating(frequency: Frequency) -> Self {
        RecurrenceRule {
            frequency,
            end: End::Never,
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.end = End::Count(count).normalized();
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.end = End::Until(date);
        self
    }

    pub fn is_never(&self) -> bool {
        self.frequency == Frequency::Never
    }
}

/// The loosely typed shape the rule is persisted in.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredRule {
    frequency: String,
    interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_of_week: Option<Vec<i64>>,
    end_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl From<StoredRule> for RecurrenceRule {
    fn from(stored: StoredRule) -> Self {
        let interval = stored
            .interval
            .filter(|i| *i >= 1)
            .map_or(1, |i| u32::try_from(i).unwrap_or(u32::MAX));

        let frequency = match stored.frequency.to_ascii_lowercase().as_str() {
            "" | "never" => Frequency::Never,
            "daily" => Frequency::Daily { interval },
            "weekly" => Frequency::Weekly {
                interval,
                days: Weekdays::from_numbers(
                    stored
                        .days_of_week
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|n| u8::try_from(n).ok()),
                ),
            },
            "monthly" => Frequency::Monthly { interval },
            "yearly" => Frequency::Yearly { interval },
            other => {
                debug!(frequency = other, "unknown stored frequency, repeating daily");
                Frequency::Daily { interval }
            }
        };

        let end = match stored.end_condition.as_deref() {
            Some("after") => match stored.end_count.and_then(|c| u32::try_from(c).ok()) {
                Some(count) if count > 0 => End::Count(count),
                _ => {
                    debug!(count = ?stored.end_count, "'after' end without a usable count");
                    End::Never
                }
            },
            Some("on") => match stored.end_date.as_deref().and_then(parse_stored_date) {
                Some(date) => End::Until(date),
                None => {
                    debug!(date = ?stored.end_date, "end condition 'on' without a usable date");
                    End::Never
                }
            },
            _ => End::Never,
        };

        RecurrenceRule { frequency, end }
    }
}

impl From<RecurrenceRule> for StoredRule {
    fn from(rule: RecurrenceRule) -> Self {
        let (end_condition, end_count, end_date) = match rule.end.normalized() {
            End::Never => ("never", None, None),
            End::Count(count) => ("after", Some(i64::from(count)), None),
            End::Until(date) => ("on", None, Some(date.format(DATE_FORMAT).to_string())),
        };

        StoredRule {
            frequency: rule.frequency.name().to_string(),
            interval: Some(i64::from(rule.frequency.interval())),
            days_of_week: rule
                .frequency
                .days()
                .map(|days| days.numbers().into_iter().map(i64::from).collect()),
            end_condition: Some(end_condition.to_string()),
            end_count,
            end_date,
        }
    }
}

/// Accepts a bare date or anything that starts with one, such as an
/// ISO timestamp.
fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10)?, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use serde_json::json;

    #[test]
    fn defaults_to_never() {
        assert!(RecurrenceRule::default().is_never());

        let rule: RecurrenceRule = serde_json::from_value(json!({})).unwrap();
        assert!(rule.is_never());
    }

    #[test]
    fn zero_count_is_never() {
        assert_eq!(RecurrenceRule::daily(1).count(0), RecurrenceRule::daily(1));

        let rule = RecurrenceRule {
            frequency: Frequency::Daily { interval: 1 },
            end: End::Count(0),
        };
        let stored = serde_json::to_value(rule).unwrap();
        assert_eq!(stored["endCondition"], "never");
        assert!(stored.get("endCount").is_none());

        let loaded: RecurrenceRule = serde_json::from_value(stored).unwrap();
        assert_eq!(loaded, RecurrenceRule::daily(1));
    }

    #[test]
    fn zero_interval_reads_as_one() {
        assert_eq!(RecurrenceRule::daily(0).frequency.interval(), 1);
    }

    #[test]
    fn loads_stored_weekly_rule() {
        let rule: RecurrenceRule = serde_json::from_value(json!({
            "frequency": "weekly",
            "interval": 2,
            "daysOfWeek": [1, 3],
            "endCondition": "after",
            "endCount": 5
        }))
        .unwrap();

        let days = Weekdays::empty().with(Weekday::Mon).with(Weekday::Wed);
        assert_eq!(rule, RecurrenceRule::weekly_on(2, days).count(5));
    }

    #[test]
    fn stores_in_host_shape() {
        let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let rule = RecurrenceRule::monthly(3).until(end);

        assert_eq!(
            serde_json::to_value(rule).unwrap(),
            json!({
                "frequency": "monthly",
                "interval": 3,
                "endCondition": "on",
                "endDate": "2026-12-31"
            })
        );
    }

    #[test]
    fn forgiving_load() {
        let rule: RecurrenceRule = serde_json::from_value(json!({
            "frequency": "fortnightly",
            "interval": -4,
            "daysOfWeek": [1, 9],
            "endCondition": "after"
        }))
        .unwrap();

        assert_eq!(rule, RecurrenceRule::daily(1));
    }

    #[test]
    fn days_on_non_weekly_rules_are_dropped() {
        let rule: RecurrenceRule = serde_json::from_value(json!({
            "frequency": "monthly",
            "daysOfWeek": [1],
            "endCondition": "on",
            "endDate": "2026-03-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(
            rule,
            RecurrenceRule::monthly(1).until(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }
}
