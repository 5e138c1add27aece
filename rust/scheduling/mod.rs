//! Generate periodic [`Schedule`]s from a declarative [`ScheduleSpecification`].
//!
//! The purpose of this module is to turn a start date, an end date and a [`Frequency`] into the
//! exact sequence of accrual periods of a periodic instrument, including:
//! - Snapping period boundaries to a monthly [`RollDay`], such as a day of the month, month end
//!   or one of the regional IMM dates.
//! - Placing any remainder that is not a whole number of regular periods into stubs under a
//!   [`StubConvention`].
//! - Business day adjustment of every period boundary under an [`Adjuster`] rule and a holiday
//!   [`Calendar`].
//!
//! # Calendars and Date Adjustment
//!
//! ## Calendars
//!
//! Three calendar types are provided: [`Cal`], [`UnionCal`] and [`NamedCal`], with the container
//! enum [`Calendar`]. They are defined by holidays and weekends, and by union rules for
//! combinations. All calendars implement the [`DateRoll`] trait, whose only required answer is
//! whether a date is a holiday.
//!
//! ### Example
//! This example creates a business day calendar defining Saturday and Sunday weekends and a
//! specific holiday (the Early May UK Bank Holiday). It rolls Saturday 29th April 2017 under the
//! *'following'* and *'modified following'* rules.
//! ```rust
//! # use periodic_schedule::scheduling::{Cal, ndt, DateRoll};
//! let cal = Cal::new(vec![ndt(2017, 5, 1)], vec![5, 6]);
//! assert_eq!(ndt(2017, 5, 2), cal.roll_forward_bus_day(&ndt(2017, 4, 29)));
//! assert_eq!(ndt(2017, 4, 28), cal.roll_mod_forward_bus_day(&ndt(2017, 4, 29)));
//! ```
//!
//! ## Date Adjustment
//!
//! The [`Adjuster`] enum names each business day adjustment rule. It implements the
//! [`Adjustment`] trait, which requires some object capable of [`DateRoll`]. All calendar types
//! implement [`CalendarAdjustment`], permitting adjustment when an [`Adjuster`] is cross-provided.
//! A [`BusinessDayAdjustment`] pairs a rule with a calendar.
//!
//! ### Example
//! ```rust
//! # use periodic_schedule::scheduling::{Cal, ndt, Adjuster, CalendarAdjustment};
//! # let cal = Cal::new(vec![ndt(2017, 5, 1)], vec![5, 6]);
//! assert_eq!(ndt(2017, 5, 2), cal.adjust(&ndt(2017, 4, 29), &Adjuster::Following {}));
//! assert_eq!(ndt(2017, 4, 28), cal.adjust(&ndt(2017, 4, 29), &Adjuster::Nearest {}));
//! ```
//!
//! # Schedules
//!
//! A [`Schedule`] is built in stages:
//!
//! 1. [`ScheduleSpecification::resolve`] applies defaults and infers roll days.
//! 2. The [`generator`] walks regular periods from the anchor implied by the stub convention.
//! 3. The stub resolver places the remainder into `INITIAL` and `FINAL` periods.
//! 4. Every boundary is adjusted once and the result is validated.
//!
//! ### Example
//! This example creates a quarterly schedule rolling on the third Wednesday of the month. The
//! range is a whole number of periods, so no stub is needed.
//! ```rust
//! # use periodic_schedule::scheduling::{ndt, Imm, Frequency, RollDay, Schedule, ScheduleSpecification, StubConvention};
//! let spec = ScheduleSpecification::try_new(
//!     ndt(2024, 3, 20),
//!     ndt(2025, 3, 19),
//!     Frequency::Months { number: 3 },
//! )
//! .unwrap()
//! .with_roll(RollDay::Imm { imm: Imm::Wed3 })
//! .with_stub(StubConvention::None);
//! let schedule = Schedule::try_new(&spec).unwrap();
//! assert!(schedule.is_regular());
//! assert_eq!(4, schedule.len());
//! assert_eq!(ndt(2024, 9, 18), schedule.uschedule()[2]);
//! ```

mod calendars;
mod frequency;
pub mod generator;
mod schedule;
mod specification;
mod stub;
mod utils;

mod serde;

pub use crate::scheduling::{
    calendars::{
        ndt, Adjuster, Adjustment, BusinessDayAdjustment, Cal, Calendar, CalendarAdjustment,
        DateRoll, NamedCal, UnionCal,
    },
    frequency::{get_eom, is_eom, Frequency, Imm, RollDay, Scheduling},
    generator::Direction,
    schedule::{Schedule, SchedulePeriod, SchedulePeriodType},
    specification::{ResolvedSpecification, ScheduleSpecification},
    stub::{resolve as resolve_stubs, StubConvention, UnadjustedPeriods},
};
