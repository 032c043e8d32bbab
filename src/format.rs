use crate::rule::{End, Frequency, RecurrenceRule};
use crate::weekdays::short_name;
use std::fmt;

/// Human readable form, e.g. `Every 2 weeks on Mon, Wed` or
/// `Every month, 5 times`. Rules that never repeat render as nothing.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.frequency {
            Frequency::Never => return Ok(()),
            Frequency::Daily { .. } => "day",
            Frequency::Weekly { .. } => "week",
            Frequency::Monthly { .. } => "month",
            Frequency::Yearly { .. } => "year",
        };

        match self.frequency.interval() {
            1 => write!(f, "Every {}", unit)?,
            n => write!(f, "Every {} {}s", n, unit)?,
        }

        if let Some(days) = self.frequency.days() {
            let names: Vec<_> = days.iter().map(short_name).collect();
            write!(f, " on {}", names.join(", "))?;
        }

        match self.end.normalized() {
            End::Never => Ok(()),
            End::Count(1) => f.write_str(", 1 time"),
            End::Count(count) => write!(f, ", {} times", count),
            End::Until(date) => write!(f, ", until {}", date.format("%Y-%m-%d")),
        }
    }
}

impl RecurrenceRule {
    pub fn describe(&self) -> String {
        self.to_string()
    }
}
