use chrono::prelude::*;
use chrono::Weekday;
use indexmap::set::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::calendars::named::{get_holidays_by_name, get_weekmask_by_name};
use crate::scheduling::{ndt, CalendarAdjustment, DateRoll, NamedCal, UnionCal};

/// A business day calendar with a singular list of holidays.
///
/// A business day calendar is formed of 2 components:
///
/// - `week_mask`: which defines the days of the week that are not general business days. In Western culture these
///   are typically `[5, 6]` for Saturday and Sunday.
/// - `holidays`: which defines specific dates that may be exceptions to the general working week, and cannot be
///   business days.
///
/// The default calendar has no holidays and no weekend, so every date is a business day.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalDataModel")]
pub struct Cal {
    pub(crate) holidays: IndexSet<NaiveDateTime>,
    pub(crate) week_mask: HashSet<Weekday>,
}

#[derive(Deserialize)]
struct CalDataModel {
    holidays: Vec<NaiveDateTime>,
    week_mask: Vec<Weekday>,
}

impl TryFrom<CalDataModel> for Cal {
    type Error = ScheduleError;

    fn try_from(model: CalDataModel) -> Result<Self, Self::Error> {
        let week_mask = model
            .week_mask
            .iter()
            .map(|d| d.num_days_from_monday() as u8)
            .collect();
        Self::try_new(model.holidays, week_mask)
    }
}

impl Cal {
    /// Create a calendar.
    ///
    /// `holidays` provide a vector of dates that cannot be business days. `week_mask` is a vector of days
    /// (0=Mon,.., 6=Sun) that are excluded from the working week.
    ///
    /// Panics if `week_mask` contains values outside of [0, 6] or excludes every day of the week.
    /// Use [`Cal::try_new`] for unchecked input.
    pub fn new(holidays: Vec<NaiveDateTime>, week_mask: Vec<u8>) -> Self {
        Self::try_new(holidays, week_mask).expect("`week_mask` is invalid.")
    }

    /// Create a calendar, validating the `week_mask`.
    pub fn try_new(holidays: Vec<NaiveDateTime>, week_mask: Vec<u8>) -> ScheduleResult<Self> {
        let mut mask: HashSet<Weekday> = HashSet::new();
        for v in week_mask {
            let day = Weekday::try_from(v).map_err(|_| ScheduleError::Parse {
                value: v.to_string(),
                target: "week mask day (0=Mon,.., 6=Sun)",
            })?;
            mask.insert(day);
        }
        validate_week_mask(&mask)?;
        Ok(Cal {
            holidays: IndexSet::from_iter(holidays.into_iter().map(|d| {
                // holidays are matched on whole dates
                d.date().and_time(NaiveTime::MIN)
            })),
            week_mask: mask,
        })
    }

    /// Create a calendar from one of the pre-defined names, `"all"` or `"bus"`.
    pub fn try_from_name(name: &str) -> ScheduleResult<Self> {
        Self::try_new(get_holidays_by_name(name)?, get_weekmask_by_name(name)?)
    }

    /// The holidays of the calendar, in insertion order.
    pub fn holidays(&self) -> Vec<NaiveDateTime> {
        self.holidays.iter().copied().collect()
    }
}

/// A week mask excluding every day leaves no business day to roll to.
pub(crate) fn validate_week_mask(mask: &HashSet<Weekday>) -> ScheduleResult<()> {
    if mask.len() == 7 {
        return Err(ScheduleError::Parse {
            value: "all seven days".to_string(),
            target: "week mask with at least one business day",
        });
    }
    Ok(())
}

impl DateRoll for Cal {
    fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        !self.week_mask.contains(&date.weekday())
    }

    fn is_holiday(&self, date: &NaiveDateTime) -> bool {
        self.holidays.contains(date)
    }
}

impl CalendarAdjustment for Cal {}

impl PartialEq<UnionCal> for Cal {
    fn eq(&self, other: &UnionCal) -> bool {
        let cd1 = self.cal_date_range(&ndt(1970, 1, 1), &ndt(2200, 12, 31));
        cd1.iter().all(|x| self.is_bus_day(x) == other.is_bus_day(x))
    }
}

impl PartialEq<NamedCal> for Cal {
    fn eq(&self, other: &NamedCal) -> bool {
        other.union_cal.eq(self)
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::Adjuster;

    fn fixture_hol_cal() -> Cal {
        let hols = vec![ndt(2015, 9, 5), ndt(2015, 9, 7)]; // Saturday and Monday
        Cal::new(hols, vec![5, 6])
    }

    #[test]
    fn test_is_holiday() {
        let cal = fixture_hol_cal();
        assert!(cal.is_holiday(&ndt(2015, 9, 7))); // In hol list
        assert!(!cal.is_holiday(&ndt(2015, 9, 10))); // Not in hol list
        assert!(!cal.is_holiday(&ndt(2024, 1, 6))); // Not in hol list
    }

    #[test]
    fn test_is_weekday() {
        let cal = fixture_hol_cal();
        assert!(cal.is_weekday(&ndt(2015, 9, 7))); // Monday
        assert!(cal.is_weekday(&ndt(2015, 9, 10))); //Thursday
        assert!(!cal.is_weekday(&ndt(2024, 1, 6))); // Saturday
        assert!(!cal.is_weekday(&ndt(2024, 1, 7))); // Sunday
    }

    #[test]
    fn test_calendar_adjust() {
        let cal = fixture_hol_cal();
        let result = cal.adjust(&ndt(2015, 9, 5), &Adjuster::Following {});
        assert_eq!(ndt(2015, 9, 8), result);
    }

    #[test]
    fn test_calendar_adjusts() {
        let cal = fixture_hol_cal();
        let result = cal.adjusts(&[ndt(2015, 9, 5), ndt(2015, 9, 6)], &Adjuster::Following {});
        assert_eq!(vec![ndt(2015, 9, 8), ndt(2015, 9, 8)], result);
    }

    #[test]
    fn test_try_new_bad_week_mask() {
        assert!(Cal::try_new(vec![], vec![7]).is_err());
        assert!(Cal::try_new(vec![], vec![0, 1, 2, 3, 4, 5, 6]).is_err());
        assert!(Cal::try_new(vec![], vec![4, 5]).is_ok());
    }

    #[test]
    fn test_deserialize_validates_week_mask() {
        let js = r#"{"holidays":["2015-09-05T00:00:00","2015-09-07T00:00:00"],"week_mask":["Sat","Sun"]}"#;
        let cal: Cal = serde_json::from_str(js).unwrap();
        assert_eq!(cal, fixture_hol_cal());

        let js = r#"{"holidays":[],"week_mask":["Mon","Tue","Wed","Thu","Fri","Sat","Sun"]}"#;
        assert!(serde_json::from_str::<Cal>(js).is_err());
    }

    #[test]
    fn test_try_from_name() {
        let bus = Cal::try_from_name("bus").unwrap();
        assert!(bus.is_non_bus_day(&ndt(2024, 1, 6)));
        let all = Cal::try_from_name("all").unwrap();
        assert!(all.is_bus_day(&ndt(2024, 1, 6)));
        assert_eq!(all, Cal::default());
        assert!(matches!(
            Cal::try_from_name("xyz"),
            Err(ScheduleError::UnknownCalendar { .. })
        ));
    }
}
