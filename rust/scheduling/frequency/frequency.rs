use chrono::prelude::*;
use chrono::{Days, Months};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::RollDay;

/// A frequency for generating unadjusted scheduling periods.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// A set number of calendar days, which can align with any unadjusted date. To achieve a
    /// `Weeks` variant use an appropriate number of `CalDays`.
    CalDays { number: u32 },
    /// A set number of calendar months. To achieve a `Years` variant use an appropriate number
    /// of `Months`.
    Months { number: u32 },
    /// Only ever defining one single period, and which can align with any unadjusted date.
    Zero {},
}

/// Used to define periods of financial instrument schedules.
pub trait Scheduling {
    /// Calculate the unadjusted date a whole number of regular periods from an anchor,
    /// aligned under a [`RollDay`].
    ///
    /// # Notes
    /// Dates are always measured from the anchor, never from a previously rolled date, so that
    /// clamping in short months does not drift the sequence.
    fn try_ustep(
        &self,
        anchor: &NaiveDateTime,
        steps: i32,
        roll: &RollDay,
    ) -> ScheduleResult<NaiveDateTime>;

    /// Calculate the next unadjusted scheduling period date from an unadjusted base date.
    fn try_unext(&self, udate: &NaiveDateTime, roll: &RollDay) -> ScheduleResult<NaiveDateTime> {
        self.try_ustep(udate, 1, roll)
    }

    /// Calculate the previous unadjusted scheduling period date from an unadjusted base date.
    fn try_uprevious(
        &self,
        udate: &NaiveDateTime,
        roll: &RollDay,
    ) -> ScheduleResult<NaiveDateTime> {
        self.try_ustep(udate, -1, roll)
    }
}

impl Frequency {
    /// Validate the frequency defines a strictly positive step.
    pub fn validate(&self) -> ScheduleResult<()> {
        match self {
            Frequency::CalDays { number: 0 } | Frequency::Months { number: 0 } => {
                Err(ScheduleError::InvalidFrequency {
                    reason: format!("{self} is not a strictly positive step"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Shift a date by a whole number of periods without any roll alignment.
    ///
    /// Month arithmetic clamps to the end of shorter months, e.g. 31st Jan + 1M is 29th Feb 2024.
    pub fn uadd(&self, udate: &NaiveDateTime, steps: i32) -> ScheduleResult<NaiveDateTime> {
        let overflow = || ScheduleError::DateOverflow {
            reason: format!("{udate} shifted by {steps} x {self}"),
        };
        let count = match self {
            Frequency::CalDays { number } | Frequency::Months { number } => number
                .checked_mul(steps.unsigned_abs())
                .ok_or_else(overflow)?,
            Frequency::Zero {} => {
                return Err(ScheduleError::InvalidFrequency {
                    reason: "a TERM frequency has no regular step".to_string(),
                })
            }
        };
        let result = match (self, steps >= 0) {
            (Frequency::Months { .. }, true) => udate.checked_add_months(Months::new(count)),
            (Frequency::Months { .. }, false) => udate.checked_sub_months(Months::new(count)),
            (_, true) => udate.checked_add_days(Days::new(u64::from(count))),
            (_, false) => udate.checked_sub_days(Days::new(u64::from(count))),
        };
        result.ok_or_else(overflow)
    }
}

impl Scheduling for Frequency {
    /// # Examples
    /// ```rust
    /// # use periodic_schedule::scheduling::{Frequency, ndt, RollDay, Scheduling};
    /// let f = Frequency::Months{number: 1};
    /// // the roll is measured from the anchor, so a clamped February does not drift
    /// assert_eq!(ndt(2024, 2, 29), f.try_ustep(&ndt(2024, 1, 31), 1, &RollDay::None{}).unwrap());
    /// assert_eq!(ndt(2024, 3, 31), f.try_ustep(&ndt(2024, 1, 31), 2, &RollDay::None{}).unwrap());
    /// ```
    fn try_ustep(
        &self,
        anchor: &NaiveDateTime,
        steps: i32,
        roll: &RollDay,
    ) -> ScheduleResult<NaiveDateTime> {
        let date = self.uadd(anchor, steps)?;
        Ok(roll.align(&date))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::CalDays { number } => write!(f, "{number}D"),
            Frequency::Months { number } => write!(f, "{number}M"),
            Frequency::Zero {} => write!(f, "TERM"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    /// Parse market tenor shorthand, e.g. "3M", "1Y", "2W", "7D", "P6M" or "TERM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let tenor = upper.strip_prefix('P').unwrap_or(&upper);
        if tenor == "TERM" || tenor == "ZERO" {
            return Ok(Frequency::Zero {});
        }
        let err = || ScheduleError::parse(s, "frequency");
        let unit = tenor.chars().last().ok_or_else(err)?;
        let number: u32 = tenor[..tenor.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| err())?;
        let frequency = match unit {
            'D' => Frequency::CalDays { number },
            'W' => Frequency::CalDays {
                number: number.checked_mul(7).ok_or_else(err)?,
            },
            'M' => Frequency::Months { number },
            'Y' => Frequency::Months {
                number: number.checked_mul(12).ok_or_else(err)?,
            },
            _ => return Err(err()),
        };
        frequency.validate()?;
        Ok(frequency)
    }
}
