//! Conversion between [`RecurrenceRule`] and the iCalendar RRULE value.
//!
//! Only `FREQ`, `INTERVAL`, `BYDAY`, `COUNT` and `UNTIL` are understood.
//! [`RecurrenceRule::from_rrule`] never fails: anything it cannot use is
//! dropped and a missing `FREQ` reads as daily. [`RecurrenceRule::parse_rrule`]
//! reports the same problems as errors instead.

use crate::error::{RRuleError, RRuleResult};
use crate::rule::{End, Frequency, RecurrenceRule};
use crate::weekdays::{from_rrule_code, rrule_code, Weekdays};
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::debug;

/// `UNTIL` is written as the last second of the end date.
const UNTIL_FORMAT: &str = "%Y%m%dT235959";

impl RecurrenceRule {
    /// e.g. `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;COUNT=5`. Empty for rules
    /// that never repeat.
    pub fn to_rrule(&self) -> String {
        let freq = match self.frequency {
            Frequency::Never => return String::new(),
            Frequency::Daily { .. } => "DAILY",
            Frequency::Weekly { .. } => "WEEKLY",
            Frequency::Monthly { .. } => "MONTHLY",
            Frequency::Yearly { .. } => "YEARLY",
        };

        let mut parts = vec![format!("FREQ={}", freq)];

        let interval = self.frequency.interval();
        if interval > 1 {
            parts.push(format!("INTERVAL={}", interval));
        }

        if let Some(days) = self.frequency.days() {
            let codes: Vec<_> = days.iter().map(rrule_code).collect();
            parts.push(format!("BYDAY={}", codes.join(",")));
        }

        match self.end.normalized() {
            End::Never => {}
            End::Count(count) => parts.push(format!("COUNT={}", count)),
            End::Until(date) => parts.push(format!("UNTIL={}", date.format(UNTIL_FORMAT))),
        }

        parts.join(";")
    }

    pub fn from_rrule(rrule: &str) -> Self {
        Parser { strict: false }
            .parse(rrule)
            .unwrap_or_else(|_| RecurrenceRule::never())
    }

    pub fn parse_rrule(rrule: &str) -> RRuleResult<Self> {
        Parser { strict: true }.parse(rrule)
    }
}

impl FromStr for RecurrenceRule {
    type Err = RRuleError;

    fn from_str(s: &str) -> RRuleResult<Self> {
        RecurrenceRule::parse_rrule(s)
    }
}

impl From<&str> for RecurrenceRule {
    fn from(s: &str) -> Self {
        RecurrenceRule::from_rrule(s)
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

struct Parser {
    strict: bool,
}

impl Parser {
    /// Strict parsing stops at the first problem; lenient parsing logs it and
    /// carries on.
    fn tolerate(&self, err: RRuleError) -> RRuleResult<()> {
        if self.strict {
            Err(err)
        } else {
            debug!(%err, "ignoring RRULE problem");
            Ok(())
        }
    }

    fn parse(&self, input: &str) -> RRuleResult<RecurrenceRule> {
        let body = strip_prefix(input.trim());
        if body.is_empty() {
            return Ok(RecurrenceRule::never());
        }

        let mut kind = None;
        let mut interval = 1;
        let mut days = Weekdays::empty();
        let mut end = End::Never;

        for part in body.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.trim().to_ascii_uppercase(), value.trim()),
                None => {
                    self.tolerate(RRuleError::MalformedPart(part.to_string()))?;
                    continue;
                }
            };

            match key.as_str() {
                "FREQ" => kind = Some(self.kind(value)?),
                "INTERVAL" => match value.parse::<u32>() {
                    Ok(n) if n > 0 => interval = n,
                    _ => self.tolerate(RRuleError::InvalidInterval(value.to_string()))?,
                },
                "BYDAY" => {
                    for token in value.split(',').map(str::trim) {
                        match from_rrule_code(token) {
                            Some(day) => days.insert(day),
                            None => self.tolerate(RRuleError::UnknownWeekday(token.to_string()))?,
                        }
                    }
                }
                "COUNT" => match value.parse::<u32>() {
                    Ok(n) if n > 0 => end = self.replace_end(end, End::Count(n))?,
                    _ => self.tolerate(RRuleError::InvalidCount(value.to_string()))?,
                },
                "UNTIL" => match parse_until(value, self.strict) {
                    Some(date) => end = self.replace_end(end, End::Until(date))?,
                    None => self.tolerate(RRuleError::InvalidUntil(value.to_string()))?,
                },
                _ => self.tolerate(RRuleError::Unsupported(key))?,
            }
        }

        let kind = match kind {
            Some(kind) => kind,
            None => {
                self.tolerate(RRuleError::MissingFrequency)?;
                Kind::Daily
            }
        };

        if !days.is_empty() && !matches!(kind, Kind::Weekly) {
            self.tolerate(RRuleError::Unsupported("BYDAY".to_string()))?;
        }

        let frequency = match kind {
            Kind::Daily => Frequency::Daily { interval },
            Kind::Weekly => Frequency::Weekly { interval, days },
            Kind::Monthly => Frequency::Monthly { interval },
            Kind::Yearly => Frequency::Yearly { interval },
        };

        Ok(RecurrenceRule { frequency, end })
    }

    fn kind(&self, value: &str) -> RRuleResult<Kind> {
        match value.to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Kind::Daily),
            "WEEKLY" => Ok(Kind::Weekly),
            "MONTHLY" => Ok(Kind::Monthly),
            "YEARLY" => Ok(Kind::Yearly),
            _ => {
                self.tolerate(RRuleError::UnknownFrequency(value.to_string()))?;
                Ok(Kind::Daily)
            }
        }
    }

    /// The later of two end parts wins unless parsing strictly.
    fn replace_end(&self, current: End, next: End) -> RRuleResult<End> {
        if let (End::Count(_), End::Until(_)) | (End::Until(_), End::Count(_)) = (current, next) {
            self.tolerate(RRuleError::CountAndUntil)?;
        }
        Ok(next)
    }
}

fn strip_prefix(s: &str) -> &str {
    match s.get(..6) {
        Some(head) if head.eq_ignore_ascii_case("RRULE:") => s[6..].trim_start(),
        _ => s,
    }
}

/// Reads `YYYYMMDD[THHmmss[Z]]` down to its date. The time part is only
/// checked when parsing strictly.
fn parse_until(value: &str, strict: bool) -> Option<NaiveDate> {
    let digits = value.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(
        digits[..4].parse().ok()?,
        digits[4..6].parse().ok()?,
        digits[6..].parse().ok()?,
    )?;

    if strict && !valid_until_time(&value[8..]) {
        return None;
    }

    Some(date)
}

fn valid_until_time(rest: &str) -> bool {
    if rest.is_empty() {
        return true;
    }

    match rest.strip_prefix('T') {
        Some(time) => {
            let time = time.strip_suffix('Z').unwrap_or(time);
            time.len() == 6 && time.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
