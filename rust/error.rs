//! The single error type raised by schedule generation.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised when a [`ScheduleSpecification`](crate::scheduling::ScheduleSpecification)
/// cannot produce a valid [`Schedule`](crate::scheduling::Schedule).
///
/// Every variant is an invalid-input failure. The engine is pure, so retrying an identical
/// specification always reproduces the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// The unadjusted start is not strictly before the unadjusted end.
    #[error("Schedule start {start} must be before end {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// The frequency is not a strictly positive step.
    #[error("Invalid frequency: {reason}")]
    InvalidFrequency { reason: String },

    /// A day-of-month roll outside of [1, 31].
    #[error("Roll day must be in [1, 31], got {day}")]
    InvalidRollDay { day: u32 },

    /// The roll convention cannot be used with the frequency, e.g. IMM rolls with monthly periods.
    #[error("Roll convention {roll} is incompatible with frequency {frequency}")]
    IncompatibleRoll { roll: String, frequency: String },

    /// An anchor date does not satisfy an explicitly given roll convention.
    #[error("Date {date} does not align with roll convention {roll}")]
    RollMismatch { date: NaiveDateTime, roll: String },

    /// Stub convention `NONE` was requested but the regular periods do not reach the far boundary.
    #[error(
        "Stub not allowed: regular periods from {anchor} do not reach {boundary} exactly (stopped at {reached})"
    )]
    StubNotAllowed {
        anchor: NaiveDateTime,
        boundary: NaiveDateTime,
        reached: NaiveDateTime,
    },

    /// Explicit regular period dates and the stub convention disagree.
    #[error("Stub conflict: {reason}")]
    StubConflict { reason: String },

    /// The forward and backward walks used by stub convention `BOTH` do not meet.
    #[error("Regular periods from {start} and back from {end} do not meet: walks crossed at {forward} and {backward}")]
    UnreconciledWalks {
        start: NaiveDateTime,
        end: NaiveDateTime,
        forward: NaiveDateTime,
        backward: NaiveDateTime,
    },

    /// Business day adjustment collapsed a period to zero length.
    #[error("Period {index} collapses to zero length after adjustment: {ustart} and {uend} both adjust to {adjusted}")]
    DegeneratePeriod {
        index: usize,
        ustart: NaiveDateTime,
        uend: NaiveDateTime,
        adjusted: NaiveDateTime,
    },

    /// Business day adjustment reordered two boundaries.
    #[error("Adjusted boundary {later} precedes adjusted boundary {earlier} at period {index}")]
    NonMonotonicAdjustment {
        index: usize,
        earlier: NaiveDateTime,
        later: NaiveDateTime,
    },

    /// Calendar arithmetic ran outside of the representable date range.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow { reason: String },

    /// Business days were added to a date that is not itself a business day.
    #[error("Cannot add business days to {date}, which is not a business day")]
    NonBusinessDay { date: NaiveDateTime },

    /// A calendar name is not known.
    #[error("'{name}' is not found in list of existing calendars")]
    UnknownCalendar { name: String },

    /// A convention or date could not be parsed from a string.
    #[error("Cannot parse '{value}' as {target}")]
    Parse { value: String, target: &'static str },

    /// JSON (de)serialization failed.
    #[error("JSON error: {reason}")]
    Json { reason: String },
}

impl ScheduleError {
    /// Whether the failure is attributable to the caller's input.
    ///
    /// Always `true`: schedule generation has no other failure category and no partial results.
    pub fn is_invalid_input(&self) -> bool {
        true
    }

    pub(crate) fn parse(value: &str, target: &'static str) -> Self {
        ScheduleError::Parse {
            value: value.to_string(),
            target,
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::Json {
            reason: err.to_string(),
        }
    }
}
