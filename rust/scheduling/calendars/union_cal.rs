use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::calendars::cal::validate_week_mask;
use crate::scheduling::{ndt, Cal, CalendarAdjustment, DateRoll};

/// A business day calendar which is the union of multiple calendars.
///
/// When the union of a business day calendar is observed the following are true:
///
/// - a weekday is such if it is a weekday in all calendars.
/// - a holiday is such if it is a holiday in any calendar.
/// - a business day is such if it is a business day in all calendars.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(try_from = "UnionCalDataModel")]
pub struct UnionCal {
    /// A vector of [Cal] used to determine **business** days.
    pub calendars: Vec<Cal>,
}

#[derive(Deserialize)]
struct UnionCalDataModel {
    calendars: Vec<Cal>,
}

impl TryFrom<UnionCalDataModel> for UnionCal {
    type Error = ScheduleError;

    fn try_from(model: UnionCalDataModel) -> Result<Self, Self::Error> {
        Self::try_new(model.calendars)
    }
}

impl UnionCal {
    /// Create a new [UnionCal].
    ///
    /// # Examples
    /// ```rust
    /// # use periodic_schedule::scheduling::{Cal, UnionCal, ndt};
    /// let stk = Cal::new(vec![ndt(2025, 6, 20)], vec![5,6]);
    /// let fed = Cal::new(vec![ndt(2025, 6, 19)], vec![5,6]);
    /// let stk_fed = UnionCal::new(vec![stk, fed]);
    /// ```
    ///
    /// Panics if the weekends of the calendars together exclude every day of the week.
    pub fn new(calendars: Vec<Cal>) -> Self {
        Self::try_new(calendars).expect("`calendars` leave no business day in the week.")
    }

    /// Create a new [UnionCal], checking that at least one day of the week remains a weekday.
    pub fn try_new(calendars: Vec<Cal>) -> ScheduleResult<Self> {
        let mask: HashSet<Weekday> = calendars
            .iter()
            .flat_map(|cal| cal.week_mask.iter().copied())
            .collect();
        validate_week_mask(&mask)?;
        Ok(UnionCal { calendars })
    }
}

impl DateRoll for UnionCal {
    fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        self.calendars.iter().all(|cal| cal.is_weekday(date))
    }

    fn is_holiday(&self, date: &NaiveDateTime) -> bool {
        self.calendars.iter().any(|cal| cal.is_holiday(date))
    }
}

impl CalendarAdjustment for UnionCal {}

impl<T> PartialEq<T> for UnionCal
where
    T: DateRoll,
{
    fn eq(&self, other: &T) -> bool {
        let cd1 = self.cal_date_range(&ndt(1970, 1, 1), &ndt(2200, 12, 31));
        cd1.iter().all(|x| self.is_bus_day(x) == other.is_bus_day(x))
    }
}
