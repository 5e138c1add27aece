use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::{ndt, Frequency, Imm};

/// A roll day, mapping a date in any month to the canonical schedule date in that month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollDay {
    /// No snapping. Dates fall exactly whole frequency steps apart from the anchor.
    None {},
    /// A day of the month in [1, 31], clamped to the last day of shorter months.
    Day { day: u32 },
    /// The last day of the month.
    EoM {},
    /// A date defined by an [`Imm`] rule.
    Imm { imm: Imm },
}

impl RollDay {
    /// Create a [`RollDay::Day`] variant, validating the day is in [1, 31].
    pub fn try_day(day: u32) -> ScheduleResult<Self> {
        if (1..=31).contains(&day) {
            Ok(RollDay::Day { day })
        } else {
            Err(ScheduleError::InvalidRollDay { day })
        }
    }

    /// Move a date to the roll date of its own month.
    ///
    /// This is pure calendar day arithmetic and never fails.
    ///
    /// # Examples
    /// ```rust
    /// # use periodic_schedule::scheduling::{ndt, RollDay};
    /// assert_eq!(ndt(2024, 2, 29), RollDay::Day{day: 31}.align(&ndt(2024, 2, 10)));
    /// assert_eq!(ndt(2023, 2, 28), RollDay::EoM{}.align(&ndt(2023, 2, 10)));
    /// ```
    pub fn align(&self, date: &NaiveDateTime) -> NaiveDateTime {
        match self {
            RollDay::None {} => *date,
            RollDay::Day { day } => get_roll_by_day(date.year(), date.month(), *day),
            RollDay::EoM {} => get_eom(date.year(), date.month()),
            RollDay::Imm { imm } => imm.from_ym(date.year(), date.month()),
        }
    }

    /// Whether an unadjusted date is an allowed value under the [`RollDay`] definition.
    pub fn validate(&self, date: &NaiveDateTime) -> bool {
        self.align(date) == *date
    }

    /// Validate that an anchor date satisfies the [`RollDay`].
    pub fn validate_anchor(&self, date: &NaiveDateTime) -> ScheduleResult<()> {
        if self.validate(date) {
            Ok(())
        } else {
            Err(ScheduleError::RollMismatch {
                date: *date,
                roll: self.to_string(),
            })
        }
    }

    /// Infer a roll day from a single anchor date. Month end dates infer [`RollDay::EoM`].
    pub fn infer_from(date: &NaiveDateTime) -> Self {
        if is_eom(date) {
            RollDay::EoM {}
        } else {
            RollDay::Day { day: date.day() }
        }
    }

    /// Check the roll day can be used to generate periods of the given [`Frequency`].
    ///
    /// Month based rolls require a month based frequency, and IMM rolls require a multiple of
    /// 3 months.
    pub fn check_frequency(&self, frequency: &Frequency) -> ScheduleResult<()> {
        match (self, frequency) {
            (RollDay::Day { day }, _) if !(1..=31).contains(day) => {
                Err(ScheduleError::InvalidRollDay { day: *day })
            }
            (RollDay::None {}, _) | (_, Frequency::Zero {}) => Ok(()),
            (RollDay::Day { .. } | RollDay::EoM {}, Frequency::Months { .. }) => Ok(()),
            (RollDay::Imm { .. }, Frequency::Months { number }) if number % 3 == 0 => Ok(()),
            _ => Err(ScheduleError::IncompatibleRoll {
                roll: self.to_string(),
                frequency: frequency.to_string(),
            }),
        }
    }
}

impl fmt::Display for RollDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollDay::None {} => write!(f, "NONE"),
            RollDay::Day { day } => write!(f, "DAY{day}"),
            RollDay::EoM {} => write!(f, "EOM"),
            RollDay::Imm { imm } => {
                let name = match imm {
                    Imm::Wed3 => "IMM",
                    Imm::Wed3_Minus2 => "IMMCAD",
                    Imm::Fri2 => "SFE",
                    Imm::Fri2_Minus1 => "IMMAUD",
                    Imm::Wed1_Post9 => "IMMNZD",
                    Imm::Day20 => "CDS",
                };
                write!(f, "{name}")
            }
        }
    }
}

impl FromStr for RollDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let imm = |imm: Imm| -> ScheduleResult<RollDay> { Ok(RollDay::Imm { imm }) };
        match upper.as_str() {
            "NONE" => Ok(RollDay::None {}),
            "EOM" => Ok(RollDay::EoM {}),
            "IMM" => imm(Imm::Wed3),
            "IMMCAD" => imm(Imm::Wed3_Minus2),
            "SFE" => imm(Imm::Fri2),
            "IMMAUD" => imm(Imm::Fri2_Minus1),
            "IMMNZD" => imm(Imm::Wed1_Post9),
            "CDS" => imm(Imm::Day20),
            _ => {
                let digits = upper.strip_prefix("DAY").unwrap_or(&upper);
                let day: u32 = digits
                    .parse()
                    .map_err(|_| ScheduleError::parse(s, "roll convention"))?;
                RollDay::try_day(day)
            }
        }
    }
}

/// Return an end of month date for given month and year.
pub fn get_eom(year: i32, month: u32) -> NaiveDateTime {
    get_roll_by_day(year, month, 31)
}

/// Test whether a given date is EoM.
pub fn is_eom(date: &NaiveDateTime) -> bool {
    let eom = get_eom(date.year(), date.month());
    *date == eom
}

/// Return the `day` of the month, clamped to the month's valid days.
fn get_roll_by_day(year: i32, month: u32, day: u32) -> NaiveDateTime {
    let mut d = day.clamp(1, 31);
    while NaiveDate::from_ymd_opt(year, month, d).is_none() && d > 28 {
        d -= 1;
    }
    ndt(year, month, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollday_equality() {
        let rd1 = RollDay::Imm { imm: Imm::Wed3 };
        let rd2 = RollDay::Imm { imm: Imm::Wed3 };
        assert_eq!(rd1, rd2);

        let rd1 = RollDay::Imm { imm: Imm::Wed3 };
        let rd2 = RollDay::EoM {};
        assert_ne!(rd1, rd2);

        let rd1 = RollDay::Day { day: 21 };
        let rd2 = RollDay::Day { day: 9 };
        assert_ne!(rd1, rd2);
    }

    #[test]
    fn test_get_eom() {
        assert_eq!(ndt(2022, 2, 28), get_eom(2022, 2));
        assert_eq!(ndt(2024, 2, 29), get_eom(2024, 2));
        assert_eq!(ndt(2022, 4, 30), get_eom(2022, 4));
        assert_eq!(ndt(2022, 3, 31), get_eom(2022, 3));
    }

    #[test]
    fn test_is_eom() {
        assert_eq!(true, is_eom(&ndt(2025, 3, 31)));
        assert_eq!(false, is_eom(&ndt(2025, 3, 30)));
    }

    #[test]
    fn test_align() {
        let options: Vec<(RollDay, NaiveDateTime, NaiveDateTime)> = vec![
            (RollDay::None {}, ndt(2024, 2, 13), ndt(2024, 2, 13)),
            (RollDay::Day { day: 15 }, ndt(2024, 2, 13), ndt(2024, 2, 15)),
            (RollDay::Day { day: 31 }, ndt(2024, 2, 13), ndt(2024, 2, 29)),
            (RollDay::Day { day: 30 }, ndt(2023, 2, 1), ndt(2023, 2, 28)),
            (RollDay::Day { day: 31 }, ndt(2024, 4, 1), ndt(2024, 4, 30)),
            (RollDay::EoM {}, ndt(2024, 1, 1), ndt(2024, 1, 31)),
            (RollDay::Imm { imm: Imm::Wed3 }, ndt(2024, 3, 1), ndt(2024, 3, 20)),
            (RollDay::Imm { imm: Imm::Day20 }, ndt(2024, 3, 31), ndt(2024, 3, 20)),
        ];
        for option in options {
            assert_eq!(option.2, option.0.align(&option.1));
        }
    }

    #[test]
    fn test_rollday_validate() {
        let options: Vec<(RollDay, NaiveDateTime, bool)> = vec![
            (RollDay::Day { day: 15 }, ndt(2000, 3, 15), true),
            (RollDay::Day { day: 31 }, ndt(2000, 3, 31), true),
            (RollDay::Day { day: 31 }, ndt(2022, 2, 28), true),
            (RollDay::Day { day: 30 }, ndt(2024, 2, 29), true),
            (RollDay::Day { day: 30 }, ndt(2024, 3, 31), false),
            (RollDay::EoM {}, ndt(2022, 2, 28), true),
            (RollDay::EoM {}, ndt(2024, 2, 28), false),
            (RollDay::None {}, ndt(2024, 2, 28), true),
        ];
        for option in options {
            assert_eq!(option.2, option.0.validate(&option.1));
        }
    }

    #[test]
    fn test_validate_anchor_mismatch() {
        let result = RollDay::EoM {}.validate_anchor(&ndt(2024, 1, 15));
        assert_eq!(
            result,
            Err(ScheduleError::RollMismatch {
                date: ndt(2024, 1, 15),
                roll: "EOM".to_string()
            })
        );
    }

    #[test]
    fn test_infer_from() {
        assert_eq!(RollDay::EoM {}, RollDay::infer_from(&ndt(2024, 4, 30)));
        assert_eq!(RollDay::Day { day: 30 }, RollDay::infer_from(&ndt(2024, 3, 30)));
        assert_eq!(RollDay::Day { day: 15 }, RollDay::infer_from(&ndt(2024, 3, 15)));
    }

    #[test]
    fn test_check_frequency() {
        let options: Vec<(RollDay, Frequency, bool)> = vec![
            (RollDay::Imm { imm: Imm::Wed3 }, Frequency::Months { number: 3 }, true),
            (RollDay::Imm { imm: Imm::Wed3 }, Frequency::Months { number: 12 }, true),
            (RollDay::Imm { imm: Imm::Wed3 }, Frequency::Months { number: 1 }, false),
            (RollDay::Imm { imm: Imm::Fri2 }, Frequency::Months { number: 4 }, false),
            (RollDay::EoM {}, Frequency::Months { number: 1 }, true),
            (RollDay::EoM {}, Frequency::CalDays { number: 7 }, false),
            (RollDay::None {}, Frequency::CalDays { number: 7 }, true),
            (RollDay::Day { day: 15 }, Frequency::Zero {}, true),
            (RollDay::Day { day: 32 }, Frequency::Months { number: 1 }, false),
        ];
        for option in options {
            assert_eq!(option.2, option.0.check_frequency(&option.1).is_ok());
        }
    }

    #[test]
    fn test_rollday_from_str() {
        let options: Vec<(&str, RollDay)> = vec![
            ("NONE", RollDay::None {}),
            ("eom", RollDay::EoM {}),
            ("IMM", RollDay::Imm { imm: Imm::Wed3 }),
            ("IMMCAD", RollDay::Imm { imm: Imm::Wed3_Minus2 }),
            ("IMMAUD", RollDay::Imm { imm: Imm::Fri2_Minus1 }),
            ("IMMNZD", RollDay::Imm { imm: Imm::Wed1_Post9 }),
            ("SFE", RollDay::Imm { imm: Imm::Fri2 }),
            ("CDS", RollDay::Imm { imm: Imm::Day20 }),
            ("DAY15", RollDay::Day { day: 15 }),
            ("9", RollDay::Day { day: 9 }),
        ];
        for option in options {
            assert_eq!(option.1, RollDay::from_str(option.0).unwrap());
            assert_eq!(option.1, RollDay::from_str(&option.1.to_string()).unwrap());
        }
        assert_eq!(
            Err(ScheduleError::InvalidRollDay { day: 32 }),
            RollDay::from_str("32")
        );
        assert!(RollDay::from_str("TUESDAY").is_err());
    }
}
