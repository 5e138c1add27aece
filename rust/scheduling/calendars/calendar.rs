use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::From;

use crate::error::ScheduleResult;
use crate::scheduling::{Cal, CalendarAdjustment, DateRoll, NamedCal, UnionCal};

/// Create a `NaiveDateTime` with default null time.
///
/// Panics if date values are invalid.
pub fn ndt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("`year`, `month` `day` are invalid.")
        .and_time(NaiveTime::MIN)
}

/// Container for calendar types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Calendar {
    Cal(Cal),
    UnionCal(UnionCal),
    NamedCal(NamedCal),
}

impl Calendar {
    /// Create a [`Calendar::NamedCal`] from a comma separated list of calendar names.
    pub fn try_from_name(name: &str) -> ScheduleResult<Self> {
        Ok(Calendar::NamedCal(NamedCal::try_new(name)?))
    }
}

impl Default for Calendar {
    /// A calendar where every date is a business day.
    fn default() -> Self {
        Calendar::Cal(Cal::default())
    }
}

impl From<Cal> for Calendar {
    fn from(item: Cal) -> Self {
        Calendar::Cal(item)
    }
}

impl From<UnionCal> for Calendar {
    fn from(item: UnionCal) -> Self {
        Calendar::UnionCal(item)
    }
}

impl From<NamedCal> for Calendar {
    fn from(item: NamedCal) -> Self {
        Calendar::NamedCal(item)
    }
}

impl DateRoll for Calendar {
    fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        match self {
            Calendar::Cal(c) => c.is_weekday(date),
            Calendar::UnionCal(c) => c.is_weekday(date),
            Calendar::NamedCal(c) => c.is_weekday(date),
        }
    }

    fn is_holiday(&self, date: &NaiveDateTime) -> bool {
        match self {
            Calendar::Cal(c) => c.is_holiday(date),
            Calendar::UnionCal(c) => c.is_holiday(date),
            Calendar::NamedCal(c) => c.is_holiday(date),
        }
    }
}

impl CalendarAdjustment for Calendar {}
