//! The declarative input to schedule generation and its resolution into explicit parameters.

use chrono::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::utils::get_unadjusted_rollday;
use crate::scheduling::{BusinessDayAdjustment, Frequency, RollDay, StubConvention};

/// The parameters defining a periodic schedule.
///
/// The specification is an immutable value. Optional parameters (the roll day and the stub
/// convention) are resolved by [`ScheduleSpecification::resolve`], which performs every
/// default and inference step before any period is generated.
///
/// # Examples
/// ```rust
/// # use periodic_schedule::scheduling::{ndt, Frequency, ScheduleSpecification, StubConvention, RollDay};
/// let spec = ScheduleSpecification::try_new(
///     ndt(2024, 1, 31),
///     ndt(2024, 12, 31),
///     Frequency::Months { number: 3 },
/// )
/// .unwrap()
/// .with_roll(RollDay::EoM {})
/// .with_stub(StubConvention::ShortInitial);
/// assert_eq!(spec.stub(), StubConvention::ShortInitial);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSpecification {
    ueffective: NaiveDateTime,
    utermination: NaiveDateTime,
    frequency: Frequency,
    #[serde(default)]
    roll: Option<RollDay>,
    #[serde(default)]
    stub: Option<StubConvention>,
    #[serde(default)]
    adjustment: BusinessDayAdjustment,
    #[serde(default)]
    ufirst_regular: Option<NaiveDateTime>,
    #[serde(default)]
    ulast_regular: Option<NaiveDateTime>,
}

impl ScheduleSpecification {
    /// Create a specification with an inferred roll day, the default stub convention and no
    /// business day adjustment.
    ///
    /// Returns an error if `ueffective` is not before `utermination` or the frequency is not a
    /// strictly positive step.
    pub fn try_new(
        ueffective: NaiveDateTime,
        utermination: NaiveDateTime,
        frequency: Frequency,
    ) -> ScheduleResult<Self> {
        validate_range(&ueffective, &utermination)?;
        frequency.validate()?;
        Ok(Self {
            ueffective,
            utermination,
            frequency,
            roll: None,
            stub: None,
            adjustment: BusinessDayAdjustment::none(),
            ufirst_regular: None,
            ulast_regular: None,
        })
    }

    /// Set an explicit roll day. [`RollDay::None`] disables snapping.
    pub fn with_roll(mut self, roll: RollDay) -> Self {
        self.roll = Some(roll);
        self
    }

    /// Set the stub convention.
    pub fn with_stub(mut self, stub: StubConvention) -> Self {
        self.stub = Some(stub);
        self
    }

    /// Set the business day adjustment applied to every period boundary.
    pub fn with_adjustment(mut self, adjustment: BusinessDayAdjustment) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Set the unadjusted start of the first regular period, creating an explicit initial stub.
    pub fn with_first_regular(mut self, date: NaiveDateTime) -> Self {
        self.ufirst_regular = Some(date);
        self
    }

    /// Set the unadjusted end of the last regular period, creating an explicit final stub.
    pub fn with_last_regular(mut self, date: NaiveDateTime) -> Self {
        self.ulast_regular = Some(date);
        self
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

    /// The explicit roll day, `None` if it is to be inferred.
    pub fn roll(&self) -> Option<RollDay> {
        self.roll
    }

    /// The stub convention, defaulting to [`StubConvention::ShortInitial`].
    pub fn stub(&self) -> StubConvention {
        self.stub.unwrap_or_default()
    }

    pub fn adjustment(&self) -> &BusinessDayAdjustment {
        &self.adjustment
    }

    pub fn ufirst_regular(&self) -> Option<NaiveDateTime> {
        self.ufirst_regular
    }

    pub fn ulast_regular(&self) -> Option<NaiveDateTime> {
        self.ulast_regular
    }

    /// Resolve every optional parameter into a [`ResolvedSpecification`].
    ///
    /// # Notes
    /// When no roll day is given, and the frequency is month based, it is inferred from the
    /// anchor of the regular periods:
    ///
    /// - `*_INITIAL` conventions: the end of the last regular period.
    /// - `*_FINAL` conventions: the start of the first regular period.
    /// - `NONE`: both ends combined, so month end dates of differing months agree.
    /// - `BOTH`: each end independently.
    ///
    /// Month end anchors infer [`RollDay::EoM`]. Day based frequencies resolve to [`RollDay::None`].
    pub fn resolve(&self) -> ScheduleResult<ResolvedSpecification> {
        validate_range(&self.ueffective, &self.utermination)?;
        self.frequency.validate()?;

        let ufront_stub = self.ufirst_regular.filter(|d| *d != self.ueffective);
        let uback_stub = self.ulast_regular.filter(|d| *d != self.utermination);
        let ustart = ufront_stub.unwrap_or(self.ueffective);
        let uend = uback_stub.unwrap_or(self.utermination);
        if let Some(date) = ufront_stub {
            validate_range(&self.ueffective, &date)?;
        }
        if let Some(date) = uback_stub {
            validate_range(&date, &self.utermination)?;
        }
        validate_range(&ustart, &uend)?;

        let stub = self.stub();
        let (start_roll, end_roll) = match (self.roll, self.frequency) {
            (Some(roll), _) => {
                roll.check_frequency(&self.frequency)?;
                (roll, roll)
            }
            (None, Frequency::Months { .. }) => match stub {
                StubConvention::ShortInitial | StubConvention::LongInitial => {
                    let roll = RollDay::infer_from(&uend);
                    (roll, roll)
                }
                StubConvention::ShortFinal | StubConvention::LongFinal => {
                    let roll = RollDay::infer_from(&ustart);
                    (roll, roll)
                }
                StubConvention::None => {
                    let roll = get_unadjusted_rollday(&ustart, &uend, true)
                        .unwrap_or_else(|| RollDay::infer_from(&ustart));
                    (roll, roll)
                }
                StubConvention::Both => (RollDay::infer_from(&ustart), RollDay::infer_from(&uend)),
            },
            (None, _) => (RollDay::None {}, RollDay::None {}),
        };

        let term = ufront_stub.is_none()
            && uback_stub.is_none()
            && match self.frequency {
                Frequency::Zero {} => true,
                _ => self.frequency.uadd(&self.ueffective, 1)? > self.utermination,
            };

        debug!(
            "Resolved schedule {} to {}: frequency {}, stub {}, rolls {}/{}, term {}",
            self.ueffective, self.utermination, self.frequency, stub, start_roll, end_roll, term
        );

        Ok(ResolvedSpecification {
            ueffective: self.ueffective,
            utermination: self.utermination,
            frequency: self.frequency,
            stub,
            start_roll,
            end_roll,
            ufront_stub,
            uback_stub,
            adjustment: self.adjustment.clone(),
            term,
        })
    }
}

fn validate_range(start: &NaiveDateTime, end: &NaiveDateTime) -> ScheduleResult<()> {
    if start < end {
        Ok(())
    } else {
        Err(ScheduleError::InvalidDateRange {
            start: *start,
            end: *end,
        })
    }
}

/// A [`ScheduleSpecification`] with every default applied and every roll day inferred.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpecification {
    pub(crate) ueffective: NaiveDateTime,
    pub(crate) utermination: NaiveDateTime,
    pub(crate) frequency: Frequency,
    pub(crate) stub: StubConvention,
    pub(crate) start_roll: RollDay,
    pub(crate) end_roll: RollDay,
    pub(crate) ufront_stub: Option<NaiveDateTime>,
    pub(crate) uback_stub: Option<NaiveDateTime>,
    pub(crate) adjustment: BusinessDayAdjustment,
    pub(crate) term: bool,
}

impl ResolvedSpecification {
    /// The roll day governing periods measured from the start of the regular periods.
    pub fn start_roll(&self) -> RollDay {
        self.start_roll
    }

    /// The roll day governing periods measured from the end of the regular periods.
    ///
    /// Differs from [`ResolvedSpecification::start_roll`] only for [`StubConvention::Both`].
    pub fn end_roll(&self) -> RollDay {
        self.end_roll
    }

    pub fn stub(&self) -> StubConvention {
        self.stub
    }

    /// Whether the range is a single TERM period.
    pub fn is_term(&self) -> bool {
        self.term
    }

    /// The range spanned by regular periods, excluding explicit stubs.
    pub fn regular_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.ufront_stub.unwrap_or(self.ueffective),
            self.uback_stub.unwrap_or(self.utermination),
        )
    }
}
