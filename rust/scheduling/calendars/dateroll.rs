use chrono::prelude::*;
use chrono::Days;
use std::cmp::Ordering;

use crate::error::{ScheduleError, ScheduleResult};

/// Simple date adjustment defining business days and holidays and rolling.
///
/// This is the only capability schedule generation requires of a holiday calendar. Implementors
/// must be safe for concurrent read access since schedules may be generated in parallel.
pub trait DateRoll {
    /// Returns whether the date is part of the general working week.
    fn is_weekday(&self, date: &NaiveDateTime) -> bool;

    /// Returns whether the date is a specific holiday excluded from the regular working week.
    fn is_holiday(&self, date: &NaiveDateTime) -> bool;

    /// Returns whether the date is a business day, i.e. part of the working week and not a holiday.
    fn is_bus_day(&self, date: &NaiveDateTime) -> bool {
        self.is_weekday(date) && !self.is_holiday(date)
    }

    /// Returns whether the date is not a business day, i.e. either not in working week or a specific holiday.
    fn is_non_bus_day(&self, date: &NaiveDateTime) -> bool {
        !self.is_bus_day(date)
    }

    /// Return the `date`, if a business day, or get the next business date after `date`.
    fn roll_forward_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date) {
            new_date = new_date + Days::new(1);
        }
        new_date
    }

    /// Return the `date`, if a business day, or get the business day preceding `date`.
    fn roll_backward_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date) {
            new_date = new_date - Days::new(1);
        }
        new_date
    }

    /// Return the `date`, if a business day, or get the proceeding business date, without rolling
    /// into a new month.
    fn roll_mod_forward_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let new_date = self.roll_forward_bus_day(date);
        if new_date.month() != date.month() {
            self.roll_backward_bus_day(date)
        } else {
            new_date
        }
    }

    /// Return the `date`, if a business day, or get the preceding business date, without rolling
    /// into a previous month.
    fn roll_mod_backward_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let new_date = self.roll_backward_bus_day(date);
        if new_date.month() != date.month() {
            self.roll_forward_bus_day(date)
        } else {
            new_date
        }
    }

    /// Return the `date`, if a business day, or get the proceeding business date, without rolling
    /// out of the half-month containing `date`.
    ///
    /// Half-months are the 1st to the 15th and the 16th to the end of the month.
    fn roll_mod_forward_bi_monthly_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let new_date = self.roll_forward_bus_day(date);
        if new_date.month() != date.month() || (date.day() <= 15 && new_date.day() > 15) {
            self.roll_backward_bus_day(date)
        } else {
            new_date
        }
    }

    /// Return the `date`, if a business day, or whichever of the next or previous business day is
    /// fewer calendar days away, favouring the next business day when equidistant.
    fn roll_nearest_bus_day(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let next = self.roll_forward_bus_day(date);
        let prev = self.roll_backward_bus_day(date);
        match (next - *date).cmp(&(*date - prev)) {
            Ordering::Greater => prev,
            _ => next,
        }
    }

    /// Shift a business day `date` by a given number of business days.
    ///
    /// Returns an error if `date` is not itself a business day.
    fn add_bus_days(&self, date: &NaiveDateTime, days: i32) -> ScheduleResult<NaiveDateTime> {
        if self.is_non_bus_day(date) {
            return Err(ScheduleError::NonBusinessDay { date: *date });
        }
        Ok(step_bus_days(self, *date, days))
    }

    /// Return a vector of business dates between a start and end, inclusive.
    fn bus_date_range(
        &self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> ScheduleResult<Vec<NaiveDateTime>> {
        if self.is_non_bus_day(start) {
            return Err(ScheduleError::NonBusinessDay { date: *start });
        }
        if self.is_non_bus_day(end) {
            return Err(ScheduleError::NonBusinessDay { date: *end });
        }
        let mut vec = Vec::new();
        let mut sample_date = *start;
        while sample_date <= *end {
            vec.push(sample_date);
            sample_date = self.add_bus_days(&sample_date, 1)?;
        }
        Ok(vec)
    }

    /// Return a vector of calendar dates between a start and end, inclusive.
    fn cal_date_range(&self, start: &NaiveDateTime, end: &NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut vec = Vec::new();
        let mut sample_date = *start;
        while sample_date <= *end {
            vec.push(sample_date);
            sample_date = sample_date + Days::new(1);
        }
        vec
    }
}

fn step_bus_days<T: DateRoll + ?Sized>(cal: &T, date: NaiveDateTime, days: i32) -> NaiveDateTime {
    let mut new_date = date;
    let mut counter: i32 = 0;
    if days < 0 {
        while counter > days {
            new_date = cal.roll_backward_bus_day(&(new_date - Days::new(1)));
            counter -= 1;
        }
    } else {
        while counter < days {
            new_date = cal.roll_forward_bus_day(&(new_date + Days::new(1)));
            counter += 1;
        }
    }
    new_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, Adjuster, Cal, CalendarAdjustment, UnionCal};

    fn fixture_hol_cal() -> Cal {
        let hols = vec![ndt(2015, 9, 5), ndt(2015, 9, 7)]; // Saturday and Monday
        Cal::new(hols, vec![5, 6])
    }

    #[test]
    fn test_roll_forward_bus_day() {
        let cal = fixture_hol_cal();
        assert_eq!(ndt(2015, 9, 8), cal.roll_forward_bus_day(&ndt(2015, 9, 7)));
        assert_eq!(ndt(2015, 9, 8), cal.roll_forward_bus_day(&ndt(2015, 9, 5)));
        assert_eq!(ndt(2015, 9, 4), cal.roll_forward_bus_day(&ndt(2015, 9, 4)));
    }

    #[test]
    fn test_roll_backward_bus_day() {
        let cal = fixture_hol_cal();
        assert_eq!(ndt(2015, 9, 4), cal.roll_backward_bus_day(&ndt(2015, 9, 7)));
        assert_eq!(ndt(2015, 9, 4), cal.roll_backward_bus_day(&ndt(2015, 9, 4)));
    }

    #[test]
    fn test_is_business_day() {
        let cal = fixture_hol_cal();
        assert!(!cal.is_bus_day(&ndt(2015, 9, 7))); // Monday in Hol list
        assert!(cal.is_bus_day(&ndt(2015, 9, 10))); // Thursday
        assert!(!cal.is_bus_day(&ndt(2024, 1, 6))); // Saturday
        assert!(cal.is_non_bus_day(&ndt(2024, 1, 6)));
    }

    #[test]
    fn test_roll_mod_forward_bus_day() {
        // Saturday 30th November 2024 cannot roll into December
        let cal = Cal::new(vec![], vec![5, 6]);
        assert_eq!(ndt(2024, 11, 29), cal.roll_mod_forward_bus_day(&ndt(2024, 11, 30)));
        assert_eq!(ndt(2024, 11, 11), cal.roll_mod_forward_bus_day(&ndt(2024, 11, 9)));
    }

    #[test]
    fn test_roll_mod_backward_bus_day() {
        // Sunday 1st December 2024 cannot roll into November
        let cal = Cal::new(vec![], vec![5, 6]);
        assert_eq!(ndt(2024, 12, 2), cal.roll_mod_backward_bus_day(&ndt(2024, 12, 1)));
        assert_eq!(ndt(2024, 12, 6), cal.roll_mod_backward_bus_day(&ndt(2024, 12, 7)));
    }

    #[test]
    fn test_roll_mod_forward_bi_monthly() {
        let cal = Cal::new(vec![], vec![5, 6]);
        // Saturday 15th June 2024 would roll to Monday 17th, crossing the half month
        assert_eq!(
            ndt(2024, 6, 14),
            cal.roll_mod_forward_bi_monthly_bus_day(&ndt(2024, 6, 15))
        );
        // Saturday 8th June 2024 rolls forward inside the first half
        assert_eq!(
            ndt(2024, 6, 10),
            cal.roll_mod_forward_bi_monthly_bus_day(&ndt(2024, 6, 8))
        );
        // Saturday 16th March 2024 starts the second half and rolls forward
        assert_eq!(
            ndt(2024, 3, 18),
            cal.roll_mod_forward_bi_monthly_bus_day(&ndt(2024, 3, 16))
        );
        // Saturday 30th November 2024 behaves as modified following
        assert_eq!(
            ndt(2024, 11, 29),
            cal.roll_mod_forward_bi_monthly_bus_day(&ndt(2024, 11, 30))
        );
    }

    #[test]
    fn test_roll_nearest_bus_day() {
        let cal = Cal::new(vec![], vec![5, 6]);
        assert_eq!(ndt(2024, 6, 7), cal.roll_nearest_bus_day(&ndt(2024, 6, 8))); // Sat
        assert_eq!(ndt(2024, 6, 10), cal.roll_nearest_bus_day(&ndt(2024, 6, 9))); // Sun
        assert_eq!(ndt(2024, 6, 5), cal.roll_nearest_bus_day(&ndt(2024, 6, 5)));

        // Wednesday holiday is equidistant, favour following
        let cal = Cal::new(vec![ndt(2024, 6, 5)], vec![5, 6]);
        assert_eq!(ndt(2024, 6, 6), cal.roll_nearest_bus_day(&ndt(2024, 6, 5)));
    }

    #[test]
    fn test_add_bus_days() {
        let hcal = Cal::new(vec![ndt(2015, 9, 8), ndt(2015, 9, 10)], vec![5, 6]);
        let cal = UnionCal::new(vec![hcal]);

        let next = cal.add_bus_days(&ndt(2015, 9, 7), 2).unwrap();
        assert_eq!(next, ndt(2015, 9, 11));

        let prev = cal.add_bus_days(&ndt(2015, 9, 15), -2).unwrap();
        assert_eq!(prev, ndt(2015, 9, 11));

        let same = cal.add_bus_days(&ndt(2015, 9, 15), 0).unwrap();
        assert_eq!(same, ndt(2015, 9, 15));
    }

    #[test]
    fn test_add_bus_days_error() {
        let cal = fixture_hol_cal();
        match cal.add_bus_days(&ndt(2015, 9, 7), 3) {
            Err(ScheduleError::NonBusinessDay { date }) => assert_eq!(date, ndt(2015, 9, 7)),
            _ => panic!("expected a non business day error"),
        }
    }

    #[test]
    fn test_bus_date_range() {
        let cal = fixture_hol_cal();
        let result = cal.bus_date_range(&ndt(2015, 9, 3), &ndt(2015, 9, 9)).unwrap();
        assert_eq!(
            result,
            vec![ndt(2015, 9, 3), ndt(2015, 9, 4), ndt(2015, 9, 8), ndt(2015, 9, 9)]
        );
        assert!(cal.bus_date_range(&ndt(2015, 9, 5), &ndt(2015, 9, 9)).is_err());
    }

    #[test]
    fn test_cal_date_range() {
        let cal = fixture_hol_cal();
        let result = cal.cal_date_range(&ndt(2015, 9, 3), &ndt(2015, 9, 6));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_rolls() {
        let cal = fixture_hol_cal();
        let udates = vec![
            ndt(2015, 9, 4),
            ndt(2015, 9, 5),
            ndt(2015, 9, 6),
            ndt(2015, 9, 7),
        ];
        let result = cal.adjusts(&udates, &Adjuster::Following {});
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
}
