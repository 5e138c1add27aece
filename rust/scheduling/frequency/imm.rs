#![allow(non_camel_case_types)]

use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::{Eq, PartialEq};

use crate::scheduling::ndt;

/// Specifier for IMM date definitions.
///
/// Each variant defines exactly one date in every calendar month. Restricting rolls to the
/// quarterly months is a matter of the [`Frequency`](crate::scheduling::Frequency) it is paired with.
#[derive(Debug, Copy, Hash, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Imm {
    /// 3rd Wednesday of the month.
    ///
    /// Commonly used by STIR futures in northern hemisphere.
    Wed3 = 0,
    /// The Monday two days before the 3rd Wednesday of the month.
    ///
    /// Used for Canadian IMM dates.
    Wed3_Minus2 = 1,
    /// 2nd Friday of the month.
    ///
    /// Used by the Sydney Futures Exchange.
    Fri2 = 2,
    /// The Thursday one day before the 2nd Friday of the month.
    ///
    /// Commonly used by ASX 90 day AUD bank bill futures.
    Fri2_Minus1 = 3,
    /// 1st Wednesday on or after the 9th of the month.
    ///
    /// Commonly used by ASX 90 day NZD bank bill futures.
    Wed1_Post9 = 4,
    /// 20th day of the month.
    ///
    /// Commonly used by CDS.
    Day20 = 5,
}

impl Imm {
    /// Check whether a given date aligns with the IMM date definition.
    pub fn validate(&self, date: &NaiveDateTime) -> bool {
        *date == self.from_ym(date.year(), date.month())
    }

    /// Get an IMM date with the appropriate definition from a given month and year.
    ///
    /// Panics if `month` is not in [1, 12].
    pub fn from_ym(&self, year: i32, month: u32) -> NaiveDateTime {
        let w = ndt(year, month, 1).weekday().num_days_from_monday();
        let day = match self {
            Imm::Wed3 => wed3(w),
            Imm::Wed3_Minus2 => wed3(w) - 2,
            Imm::Fri2 => fri2(w),
            Imm::Fri2_Minus1 => fri2(w) - 1,
            Imm::Wed1_Post9 => {
                let w9 = (w + 8) % 7;
                9 + (9 - w9) % 7
            }
            Imm::Day20 => 20,
        };
        ndt(year, month, day)
    }

}

// days from Monday of the 1st of the month
fn wed3(w: u32) -> u32 {
    if w <= 2 {
        17 - w
    } else {
        24 - w
    }
}

fn fri2(w: u32) -> u32 {
    if w <= 4 {
        12 - w
    } else {
        19 - w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imm_date_determination() {
        let options: Vec<(Imm, NaiveDateTime, bool)> = vec![
            (Imm::Wed3, ndt(2024, 2, 21), true),
            (Imm::Wed3, ndt(2000, 3, 15), true),
            (Imm::Wed3, ndt(2025, 3, 19), true),
            (Imm::Wed3, ndt(2025, 3, 18), false),
            (Imm::Wed3_Minus2, ndt(2025, 3, 17), true),
            (Imm::Wed3_Minus2, ndt(2024, 6, 17), true),
            (Imm::Day20, ndt(2000, 2, 21), false),
            (Imm::Day20, ndt(2000, 3, 20), true),
            (Imm::Fri2, ndt(2024, 2, 9), true),
            (Imm::Fri2, ndt(2024, 12, 13), true),
            (Imm::Fri2_Minus1, ndt(2024, 12, 12), true),
            (Imm::Fri2_Minus1, ndt(2024, 3, 7), true),
            (Imm::Wed1_Post9, ndt(2025, 9, 10), true),
            (Imm::Wed1_Post9, ndt(2026, 9, 9), true),
            (Imm::Wed1_Post9, ndt(2026, 9, 16), false),
            (Imm::Wed1_Post9, ndt(2024, 3, 13), true),
        ];
        for option in options {
            assert_eq!(option.2, option.0.validate(&option.1));
        }
    }
}
