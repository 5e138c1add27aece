use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::{Calendar, DateRoll};

/// A list of rules for performing business day adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjuster {
    /// Actual date without adjustment.
    Actual {},
    /// Following adjustment rule.
    Following {},
    /// Modified following adjustment rule.
    ModifiedFollowing {},
    /// Previous (preceding) adjustment rule.
    Previous {},
    /// Modified previous (preceding) adjustment rule.
    ModifiedPrevious {},
    /// Following adjustment rule without leaving the half-month, [1, 15] or [16, EoM].
    ModifiedFollowingBiMonthly {},
    /// Closest business day, favouring following when equidistant.
    Nearest {},
}

/// Perform date adjustment according to calendar definitions, i.e. a known [`DateRoll`].
pub trait Adjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust<T: DateRoll>(&self, udate: &NaiveDateTime, calendar: &T) -> NaiveDateTime;

    /// Adjust a vector of dates under an adjustment rule;
    fn adjusts<T: DateRoll>(&self, udates: &[NaiveDateTime], calendar: &T) -> Vec<NaiveDateTime>;
}

/// Perform date adjustment according to adjustment rules, i.e. a given [`Adjuster`].
pub trait CalendarAdjustment {
    /// Adjust a date under an adjustment rule.
    fn adjust(&self, udate: &NaiveDateTime, adjuster: &Adjuster) -> NaiveDateTime
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjust(udate, self)
    }

    /// Adjust a vector of dates under an adjustment rule;
    fn adjusts(&self, udates: &[NaiveDateTime], adjuster: &Adjuster) -> Vec<NaiveDateTime>
    where
        Self: Sized + DateRoll,
    {
        adjuster.adjusts(udates, self)
    }
}

impl Adjustment for Adjuster {
    fn adjust<T: DateRoll>(&self, udate: &NaiveDateTime, calendar: &T) -> NaiveDateTime {
        match self {
            Adjuster::Actual {} => *udate,
            Adjuster::Following {} => calendar.roll_forward_bus_day(udate),
            Adjuster::Previous {} => calendar.roll_backward_bus_day(udate),
            Adjuster::ModifiedFollowing {} => calendar.roll_mod_forward_bus_day(udate),
            Adjuster::ModifiedPrevious {} => calendar.roll_mod_backward_bus_day(udate),
            Adjuster::ModifiedFollowingBiMonthly {} => {
                calendar.roll_mod_forward_bi_monthly_bus_day(udate)
            }
            Adjuster::Nearest {} => calendar.roll_nearest_bus_day(udate),
        }
    }

    fn adjusts<T: DateRoll>(&self, udates: &[NaiveDateTime], calendar: &T) -> Vec<NaiveDateTime> {
        udates
            .iter()
            .map(|udate| self.adjust(udate, calendar))
            .collect()
    }
}

impl fmt::Display for Adjuster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Adjuster::Actual {} => "NO_ADJUST",
            Adjuster::Following {} => "FOLLOWING",
            Adjuster::ModifiedFollowing {} => "MODIFIED_FOLLOWING",
            Adjuster::Previous {} => "PRECEDING",
            Adjuster::ModifiedPrevious {} => "MODIFIED_PRECEDING",
            Adjuster::ModifiedFollowingBiMonthly {} => "MODIFIED_FOLLOWING_BI_MONTHLY",
            Adjuster::Nearest {} => "NEAREST",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Adjuster {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['-', ' '], "_").as_str() {
            "NO_ADJUST" | "NONE" | "ACTUAL" => Ok(Adjuster::Actual {}),
            "F" | "FOLLOWING" => Ok(Adjuster::Following {}),
            "MF" | "MODIFIED_FOLLOWING" => Ok(Adjuster::ModifiedFollowing {}),
            "P" | "PRECEDING" | "PREVIOUS" => Ok(Adjuster::Previous {}),
            "MP" | "MODIFIED_PRECEDING" | "MODIFIED_PREVIOUS" => Ok(Adjuster::ModifiedPrevious {}),
            "MFBM" | "MODIFIED_FOLLOWING_BI_MONTHLY" => Ok(Adjuster::ModifiedFollowingBiMonthly {}),
            "NEAREST" => Ok(Adjuster::Nearest {}),
            _ => Err(ScheduleError::parse(s, "business day convention")),
        }
    }
}

/// A business day [`Adjuster`] paired with the [`Calendar`] it is applied against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDayAdjustment {
    pub adjuster: Adjuster,
    pub calendar: Calendar,
}

impl BusinessDayAdjustment {
    /// Create a new [`BusinessDayAdjustment`].
    pub fn new(adjuster: Adjuster, calendar: Calendar) -> Self {
        Self { adjuster, calendar }
    }

    /// An adjustment which leaves every date unchanged.
    pub fn none() -> Self {
        Self::new(Adjuster::Actual {}, Calendar::default())
    }

    /// Create an adjustment from a convention and a calendar name, e.g. `("MF", "bus")`.
    pub fn try_from_names(adjuster: &str, calendar: &str) -> ScheduleResult<Self> {
        Ok(Self::new(
            Adjuster::from_str(adjuster)?,
            Calendar::try_from_name(calendar)?,
        ))
    }

    /// Adjust an unadjusted date.
    pub fn adjust(&self, udate: &NaiveDateTime) -> NaiveDateTime {
        self.adjuster.adjust(udate, &self.calendar)
    }

    /// Adjust a sequence of unadjusted dates.
    pub fn adjusts(&self, udates: &[NaiveDateTime]) -> Vec<NaiveDateTime> {
        self.adjuster.adjusts(udates, &self.calendar)
    }
}

impl Default for BusinessDayAdjustment {
    fn default() -> Self {
        Self::none()
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, Cal};

    fn fixture_hol_cal() -> Cal {
        let hols = vec![ndt(2015, 9, 5), ndt(2015, 9, 7)]; // Saturday and Monday
        Cal::new(hols, vec![5, 6])
    }

    #[test]
    fn test_adjusts() {
        let cal = fixture_hol_cal();
        let udates = vec![
            ndt(2015, 9, 4),
            ndt(2015, 9, 5),
            ndt(2015, 9, 6),
            ndt(2015, 9, 7),
        ];
        let result = Adjuster::Following {}.adjusts(&udates, &cal);
        assert_eq!(
            result,
            vec![
                ndt(2015, 9, 4),
                ndt(2015, 9, 8),
                ndt(2015, 9, 8),
                ndt(2015, 9, 8)
            ]
        );
    }

    #[test]
    fn test_adjust_each_rule() {
        let cal = Cal::new(vec![], vec![5, 6]);
        let options: Vec<(Adjuster, NaiveDateTime, NaiveDateTime)> = vec![
            (Adjuster::Actual {}, ndt(2024, 11, 30), ndt(2024, 11, 30)),
            (Adjuster::Following {}, ndt(2024, 11, 30), ndt(2024, 12, 2)),
            (Adjuster::ModifiedFollowing {}, ndt(2024, 11, 30), ndt(2024, 11, 29)),
            (Adjuster::Previous {}, ndt(2024, 12, 1), ndt(2024, 11, 29)),
            (Adjuster::ModifiedPrevious {}, ndt(2024, 12, 1), ndt(2024, 12, 2)),
            (Adjuster::ModifiedFollowingBiMonthly {}, ndt(2024, 6, 15), ndt(2024, 6, 14)),
            (Adjuster::Nearest {}, ndt(2024, 6, 8), ndt(2024, 6, 7)),
        ];
        for option in options {
            assert_eq!(option.2, option.0.adjust(&option.1, &cal));
        }
    }

    #[test]
    fn test_adjust_idempotent() {
        let cal = fixture_hol_cal();
        let adjusters = vec![
            Adjuster::Actual {},
            Adjuster::Following {},
            Adjuster::ModifiedFollowing {},
            Adjuster::Previous {},
            Adjuster::ModifiedPrevious {},
            Adjuster::ModifiedFollowingBiMonthly {},
            Adjuster::Nearest {},
        ];
        for adjuster in adjusters {
            for udate in cal.cal_date_range(&ndt(2015, 8, 25), &ndt(2015, 9, 20)) {
                let once = adjuster.adjust(&udate, &cal);
                assert_eq!(once, adjuster.adjust(&once, &cal));
            }
        }
    }

    #[test]
    fn test_adjuster_from_str() {
        let options: Vec<(&str, Adjuster)> = vec![
            ("MF", Adjuster::ModifiedFollowing {}),
            ("modified_following", Adjuster::ModifiedFollowing {}),
            ("no-adjust", Adjuster::Actual {}),
            ("p", Adjuster::Previous {}),
            ("Nearest", Adjuster::Nearest {}),
            ("MFBM", Adjuster::ModifiedFollowingBiMonthly {}),
        ];
        for option in options {
            assert_eq!(option.1, Adjuster::from_str(option.0).unwrap());
        }
        assert!(Adjuster::from_str("sideways").is_err());
    }

    #[test]
    fn test_business_day_adjustment() {
        let bda = BusinessDayAdjustment::try_from_names("F", "bus").unwrap();
        assert_eq!(ndt(2024, 12, 2), bda.adjust(&ndt(2024, 11, 30)));
        assert_eq!(
            vec![ndt(2024, 12, 2), ndt(2024, 12, 3)],
            bda.adjusts(&[ndt(2024, 12, 1), ndt(2024, 12, 3)])
        );
        assert_eq!(ndt(2024, 11, 30), BusinessDayAdjustment::none().adjust(&ndt(2024, 11, 30)));
    }
}
