mod adjuster;
mod cal;
mod calendar;
mod dateroll;
mod named;
mod named_cal;
mod union_cal;

pub use crate::scheduling::calendars::{
    adjuster::{Adjuster, Adjustment, BusinessDayAdjustment, CalendarAdjustment},
    cal::Cal,
    calendar::{ndt, Calendar},
    dateroll::DateRoll,
    named_cal::NamedCal,
    union_cal::UnionCal,
};
