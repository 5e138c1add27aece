use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::{Cal, CalendarAdjustment, DateRoll, UnionCal};

/// A wrapper for a UnionCal struct specified by a string representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "NamedCalDataModel")]
pub struct NamedCal {
    pub name: String,
    #[serde(skip)]
    pub union_cal: UnionCal,
}

#[derive(Deserialize)]
struct NamedCalDataModel {
    name: String,
}

impl TryFrom<NamedCalDataModel> for NamedCal {
    type Error = ScheduleError;

    fn try_from(model: NamedCalDataModel) -> Result<Self, Self::Error> {
        Self::try_new(&model.name)
    }
}

impl NamedCal {
    /// Create a new [`NamedCal`].
    ///
    /// # Notes
    /// `name` must be a string that contains pre-defined calendars separated by commas.
    ///
    /// # Examples
    /// ```rust
    /// # use periodic_schedule::scheduling::{NamedCal};
    /// let named_cal = NamedCal::try_new("all,bus");
    /// # let named_cal = named_cal.unwrap();
    /// assert_eq!(named_cal.union_cal.calendars.len(), 2);
    /// ```
    pub fn try_new(name: &str) -> ScheduleResult<Self> {
        let name_ = name.trim().to_lowercase();
        let cals = name_
            .split(',')
            .map(|cal| Cal::try_from_name(cal.trim()))
            .collect::<ScheduleResult<Vec<Cal>>>()?;
        Ok(Self {
            name: name_,
            union_cal: UnionCal::try_new(cals)?,
        })
    }
}

impl DateRoll for NamedCal {
    fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        self.union_cal.is_weekday(date)
    }

    fn is_holiday(&self, date: &NaiveDateTime) -> bool {
        self.union_cal.is_holiday(date)
    }
}

impl CalendarAdjustment for NamedCal {}

impl<T> PartialEq<T> for NamedCal
where
    T: DateRoll,
{
    fn eq(&self, other: &T) -> bool {
        self.union_cal.eq(other)
    }
}
