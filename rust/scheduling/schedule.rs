use chrono::prelude::*;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::generator::generate;
use crate::scheduling::stub::resolve;
use crate::scheduling::{
    BusinessDayAdjustment, Frequency, RollDay, ScheduleSpecification, StubConvention,
};

/// The role of a period within a [`Schedule`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulePeriodType {
    /// A stub adjacent to the start of the schedule.
    Initial,
    /// A period of exactly one frequency step.
    Regular,
    /// A stub adjacent to the end of the schedule.
    Final,
    /// The single period of a range shorter than one frequency step.
    Term,
}

impl fmt::Display for SchedulePeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulePeriodType::Initial => "INITIAL",
            SchedulePeriodType::Regular => "REGULAR",
            SchedulePeriodType::Final => "FINAL",
            SchedulePeriodType::Term => "TERM",
        };
        write!(f, "{name}")
    }
}

/// A single period of a [`Schedule`] with its unadjusted and adjusted boundaries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub ustart: NaiveDateTime,
    pub uend: NaiveDateTime,
    pub astart: NaiveDateTime,
    pub aend: NaiveDateTime,
    pub period_type: SchedulePeriodType,
}

/// A generated schedule of periods.
///
/// The unadjusted periods tile `[ueffective, utermination]` with no gaps and no overlaps. Every
/// boundary is business day adjusted exactly once, so a date shared by two adjacent periods has
/// one adjusted value.
///
/// # Examples
/// ```rust
/// # use periodic_schedule::scheduling::{ndt, Frequency, RollDay, Schedule, ScheduleSpecification, StubConvention};
/// let spec = ScheduleSpecification::try_new(
///     ndt(2024, 1, 31),
///     ndt(2024, 12, 31),
///     Frequency::Months { number: 3 },
/// )
/// .unwrap()
/// .with_roll(RollDay::EoM {})
/// .with_stub(StubConvention::ShortInitial);
/// let schedule = Schedule::try_new(&spec).unwrap();
/// assert_eq!(
///     schedule.uschedule(),
///     &vec![ndt(2024, 1, 31), ndt(2024, 3, 31), ndt(2024, 6, 30), ndt(2024, 9, 30), ndt(2024, 12, 31)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleDataModel")]
pub struct Schedule {
    ueffective: NaiveDateTime,
    utermination: NaiveDateTime,
    frequency: Frequency,
    stub: StubConvention,
    start_roll: RollDay,
    end_roll: RollDay,
    adjustment: BusinessDayAdjustment,
    ufront_stub: Option<NaiveDateTime>,
    uback_stub: Option<NaiveDateTime>,

    // created data objects
    uschedule: Vec<NaiveDateTime>,
    aschedule: Vec<NaiveDateTime>,
    periods: Vec<SchedulePeriod>,
}

#[derive(Deserialize)]
struct ScheduleDataModel {
    ueffective: NaiveDateTime,
    utermination: NaiveDateTime,
    frequency: Frequency,
    stub: StubConvention,
    start_roll: RollDay,
    end_roll: RollDay,
    adjustment: BusinessDayAdjustment,
    ufront_stub: Option<NaiveDateTime>,
    uback_stub: Option<NaiveDateTime>,
    uschedule: Vec<NaiveDateTime>,
    aschedule: Vec<NaiveDateTime>,
    periods: Vec<SchedulePeriod>,
}

impl TryFrom<ScheduleDataModel> for Schedule {
    type Error = ScheduleError;

    /// Regenerate the schedule from its parameters and require the stored periods to match.
    fn try_from(model: ScheduleDataModel) -> Result<Self, Self::Error> {
        let mut spec =
            ScheduleSpecification::try_new(model.ueffective, model.utermination, model.frequency)?
                .with_stub(model.stub)
                .with_adjustment(model.adjustment);
        // differing rolls are inferred independently at each end
        if model.start_roll == model.end_roll {
            spec = spec.with_roll(model.start_roll);
        }
        if let Some(date) = model.ufront_stub {
            spec = spec.with_first_regular(date);
        }
        if let Some(date) = model.uback_stub {
            spec = spec.with_last_regular(date);
        }
        let schedule = Schedule::try_new(&spec)?;
        if schedule.uschedule != model.uschedule
            || schedule.aschedule != model.aschedule
            || schedule.periods != model.periods
            || schedule.start_roll != model.start_roll
            || schedule.end_roll != model.end_roll
        {
            return Err(ScheduleError::Json {
                reason: "schedule periods do not match those generated by its parameters"
                    .to_string(),
            });
        }
        Ok(schedule)
    }
}

impl Schedule {
    /// Generate a schedule from a specification.
    ///
    /// Resolves the specification, generates unadjusted regular periods, resolves stubs, adjusts
    /// each boundary and validates the result. No partial schedule is ever returned.
    pub fn try_new(spec: &ScheduleSpecification) -> ScheduleResult<Self> {
        let resolved = spec.resolve()?;
        let walks = generate(&resolved)?;
        let unadjusted = resolve(walks, &resolved)?;

        let uschedule = unadjusted.boundaries;
        let aschedule: Vec<NaiveDateTime> = uschedule
            .iter()
            .map(|udate| {
                let adate = resolved.adjustment.adjust(udate);
                trace!("Adjusted {} to {}", udate, adate);
                adate
            })
            .collect();
        validate(&uschedule, &aschedule)?;

        let periods: Vec<SchedulePeriod> = uschedule
            .iter()
            .tuple_windows()
            .zip(aschedule.iter().tuple_windows())
            .zip(unadjusted.period_types.iter())
            .map(|(((us, ue), (as_, ae)), period_type)| SchedulePeriod {
                ustart: *us,
                uend: *ue,
                astart: *as_,
                aend: *ae,
                period_type: *period_type,
            })
            .collect();
        debug!(
            "Built schedule {} to {} with {} periods",
            resolved.ueffective,
            resolved.utermination,
            periods.len()
        );

        Ok(Self {
            ueffective: resolved.ueffective,
            utermination: resolved.utermination,
            frequency: resolved.frequency,
            stub: resolved.stub,
            start_roll: resolved.start_roll,
            end_roll: resolved.end_roll,
            adjustment: resolved.adjustment,
            ufront_stub: resolved.ufront_stub,
            uback_stub: resolved.uback_stub,
            uschedule,
            aschedule,
            periods,
        })
    }

    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// The unadjusted period boundaries, one more than the number of periods.
    pub fn uschedule(&self) -> &Vec<NaiveDateTime> {
        &self.uschedule
    }

    /// The adjusted period boundaries, aligned with [`Schedule::uschedule`].
    pub fn aschedule(&self) -> &Vec<NaiveDateTime> {
        &self.aschedule
    }

    /// The number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always `false`: a schedule has at least one period.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Whether every period is a regular period.
    pub fn is_regular(&self) -> bool {
        self.periods
            .iter()
            .all(|p| p.period_type == SchedulePeriodType::Regular)
    }

    pub fn ueffective(&self) -> NaiveDateTime {
        self.ueffective
    }

    pub fn utermination(&self) -> NaiveDateTime {
        self.utermination
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn stub(&self) -> StubConvention {
        self.stub
    }

    /// The resolved roll day of periods measured from the start.
    pub fn roll(&self) -> RollDay {
        self.start_roll
    }

    /// The resolved roll day of periods measured from the end. Differs from
    /// [`Schedule::roll`] only under [`StubConvention::Both`].
    pub fn end_roll(&self) -> RollDay {
        self.end_roll
    }

    pub fn adjustment(&self) -> &BusinessDayAdjustment {
        &self.adjustment
    }

    /// The unadjusted start of the first regular period, if an explicit initial stub was given.
    pub fn ufront_stub(&self) -> Option<NaiveDateTime> {
        self.ufront_stub
    }

    /// The unadjusted end of the last regular period, if an explicit final stub was given.
    pub fn uback_stub(&self) -> Option<NaiveDateTime> {
        self.uback_stub
    }
}

/// Check the unadjusted boundaries strictly increase and the adjusted boundaries keep every
/// period at positive length in the same order.
fn validate(uschedule: &[NaiveDateTime], aschedule: &[NaiveDateTime]) -> ScheduleResult<()> {
    for (index, ((us, ue), (as_, ae))) in uschedule
        .iter()
        .tuple_windows()
        .zip(aschedule.iter().tuple_windows())
        .enumerate()
    {
        if us >= ue {
            return Err(ScheduleError::InvalidDateRange {
                start: *us,
                end: *ue,
            });
        }
        if as_ == ae {
            return Err(ScheduleError::DegeneratePeriod {
                index,
                ustart: *us,
                uend: *ue,
                adjusted: *as_,
            });
        }
        if as_ > ae {
            return Err(ScheduleError::NonMonotonicAdjustment {
                index,
                earlier: *as_,
                later: *ae,
            });
        }
    }
    Ok(())
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>10} {:>10} {:>10} {:>10}",
            "type", "ustart", "uend", "astart", "aend"
        )?;
        for p in &self.periods {
            writeln!(
                f,
                "{:<8} {} {} {} {}",
                p.period_type.to_string(),
                p.ustart.date(),
                p.uend.date(),
                p.astart.date(),
                p.aend.date()
            )?;
        }
        Ok(())
    }
}
