//! Expansion of recurring calendar events.
//!
//! A [`RecurrenceRule`] attached to an [`Event`] is turned into concrete
//! [`EventInstance`]s for a [`DateRange`], rendered as text through its
//! `Display` impl, and converted to and from the iCalendar RRULE value.
//! Everything here is a pure function of its inputs.

mod daily;
mod error;
mod event;
mod expand;
mod format;
mod monthly;
mod rrule;
mod rule;
mod set;
mod tz_date_iterator;
mod weekdays;
mod weekly;
mod yearly;

#[cfg(test)]
mod test_helpers;

pub use error::{RRuleError, RRuleResult};
pub use event::{Event, EventInstance};
pub use expand::{
    generate_instances, generate_instances_with, DateRange, ExpandOptions, MAX_OCCURRENCES,
};
pub use rule::{End, Frequency, RecurrenceRule};
pub use set::Set;
pub use tz_date_iterator::Occurrence;
pub use weekdays::Weekdays;
