use crate::scheduling::{is_eom, RollDay};
use chrono::prelude::*;
use std::ops::RangeInclusive;

/// The day of month rolls that a date satisfies: only its own day, unless it is a month end
/// date, when every larger day is clamped onto it as well.
fn roll_day_candidates(date: &NaiveDateTime) -> RangeInclusive<u32> {
    if is_eom(date) {
        date.day()..=31
    } else {
        date.day()..=date.day()
    }
}

/// Infer a RollDay from given dates of a regular schedule.
///
/// Days before month end will only be valid if they match by day.
/// Month end options are controlled by the ``eom`` parameter.
/// If any date is 31 and the other date is EoM then '31' is returned.
/// If both dates are EoM but neither is 31 and ``eom`` is True then 'EoM' is returned.
/// If both dates are EoM but neither is 31 and ``eom`` is False then max(day) is returned.
pub(crate) fn get_unadjusted_rollday(
    ueffective: &NaiveDateTime,
    utermination: &NaiveDateTime,
    eom: bool,
) -> Option<RollDay> {
    let (e, t) = (roll_day_candidates(ueffective), roll_day_candidates(utermination));
    let lower = *e.start().max(t.start());
    let upper = *e.end().min(t.end());
    if lower > upper {
        None
    } else if eom && lower < 31 && is_eom(ueffective) && is_eom(utermination) {
        Some(RollDay::EoM {})
    } else {
        Some(RollDay::Day { day: lower })
    }
}
