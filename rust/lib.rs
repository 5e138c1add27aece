//! Periodic schedule generation for financial instruments.
//!
//! A [`ScheduleSpecification`](scheduling::ScheduleSpecification) of a date range, a frequency, a
//! roll convention, a stub convention and a business day adjustment is turned into a validated
//! [`Schedule`](scheduling::Schedule) of accrual periods.

#[cfg(test)]
mod tests;

pub mod error;
pub mod json;
pub mod scheduling;

pub use crate::error::{ScheduleError, ScheduleResult};
