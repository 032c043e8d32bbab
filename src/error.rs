//! Errors reported by strict RRULE parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RRuleError {
    #[error("RRULE part '{0}' is not a KEY=VALUE pair")]
    MalformedPart(String),

    #[error("RRULE has no FREQ")]
    MissingFrequency,

    #[error("Unsupported frequency: {0}")]
    UnknownFrequency(String),

    #[error("Invalid INTERVAL: {0}")]
    InvalidInterval(String),

    #[error("Invalid COUNT: {0}")]
    InvalidCount(String),

    #[error("Invalid UNTIL: {0}")]
    InvalidUntil(String),

    #[error("Unknown BYDAY token: {0}")]
    UnknownWeekday(String),

    #[error("Unsupported RRULE part: {0}")]
    Unsupported(String),

    #[error("RRULE sets both COUNT and UNTIL")]
    CountAndUntil,
}

/// Result type alias for RRULE parsing.
pub type RRuleResult<T> = Result<T, RRuleError>;
