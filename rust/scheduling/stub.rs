use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::generator::{UnadjustedWalk, WalkMeeting, Walks};
use crate::scheduling::{Direction, ResolvedSpecification, SchedulePeriodType};

/// The policy for placing a remainder that is not a whole number of regular periods.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StubConvention {
    /// No stub is permitted. The range must divide into whole regular periods.
    None,
    /// A single period, shorter than a regular one, adjacent to the start.
    #[default]
    ShortInitial,
    /// A single period, longer than a regular one, adjacent to the start.
    LongInitial,
    /// A single period, shorter than a regular one, adjacent to the end.
    ShortFinal,
    /// A single period, longer than a regular one, adjacent to the end.
    LongFinal,
    /// Independent walks from each end that must meet.
    ///
    /// The periods are all regular when either walk lands exactly on the far end, or when the
    /// walks share a date. Otherwise generation fails. Stubs at both ends come only from the
    /// explicit first and last regular dates of the specification.
    Both,
}

impl StubConvention {
    fn is_long(&self) -> bool {
        matches!(self, StubConvention::LongInitial | StubConvention::LongFinal)
    }
}

impl fmt::Display for StubConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StubConvention::None => "NONE",
            StubConvention::ShortInitial => "SHORT_INITIAL",
            StubConvention::LongInitial => "LONG_INITIAL",
            StubConvention::ShortFinal => "SHORT_FINAL",
            StubConvention::LongFinal => "LONG_FINAL",
            StubConvention::Both => "BOTH",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StubConvention {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "NONE" => Ok(StubConvention::None),
            "SHORT_INITIAL" | "SHORTFRONT" | "SHORT_FRONT" => Ok(StubConvention::ShortInitial),
            "LONG_INITIAL" | "LONGFRONT" | "LONG_FRONT" => Ok(StubConvention::LongInitial),
            "SHORT_FINAL" | "SHORTBACK" | "SHORT_BACK" => Ok(StubConvention::ShortFinal),
            "LONG_FINAL" | "LONGBACK" | "LONG_BACK" => Ok(StubConvention::LongFinal),
            "BOTH" => Ok(StubConvention::Both),
            _ => Err(ScheduleError::parse(s, "stub convention")),
        }
    }
}

/// Unadjusted period boundaries with a type for each period.
#[derive(Debug, Clone, PartialEq)]
pub struct UnadjustedPeriods {
    /// Ascending boundaries; period `i` is `[boundaries[i], boundaries[i + 1]]`.
    pub boundaries: Vec<NaiveDateTime>,
    /// One entry per period.
    pub period_types: Vec<SchedulePeriodType>,
}

impl UnadjustedPeriods {
    fn regular(boundaries: Vec<NaiveDateTime>) -> Self {
        let period_types = vec![SchedulePeriodType::Regular; boundaries.len() - 1];
        Self {
            boundaries,
            period_types,
        }
    }
}

/// Reconcile generated walks into final unadjusted periods under the stub convention.
///
/// Explicit stub dates of the specification are added as `Initial` and `Final` periods around
/// the regular range.
pub fn resolve(walks: Walks, spec: &ResolvedSpecification) -> ScheduleResult<UnadjustedPeriods> {
    let mut periods = match walks {
        Walks::Term => {
            return Ok(UnadjustedPeriods {
                boundaries: vec![spec.ueffective, spec.utermination],
                period_types: vec![SchedulePeriodType::Term],
            })
        }
        Walks::Single(walk) => resolve_single(walk, spec)?,
        Walks::Both {
            forward,
            backward,
            meeting,
        } => resolve_both(forward, backward, meeting)?,
    };

    if let Some(date) = spec.ufront_stub {
        periods.boundaries.insert(0, spec.ueffective);
        periods.period_types.insert(0, SchedulePeriodType::Initial);
        debug_assert_eq!(periods.boundaries[1], date);
    }
    if let Some(date) = spec.uback_stub {
        periods.boundaries.push(spec.utermination);
        periods.period_types.push(SchedulePeriodType::Final);
        debug_assert_eq!(periods.boundaries[periods.boundaries.len() - 2], date);
    }
    Ok(periods)
}

fn resolve_single(
    walk: UnadjustedWalk,
    spec: &ResolvedSpecification,
) -> ScheduleResult<UnadjustedPeriods> {
    if walk.exact {
        return Ok(UnadjustedPeriods::regular(walk.boundaries));
    }
    let stub = spec.stub();
    if stub == StubConvention::None {
        return Err(ScheduleError::StubNotAllowed {
            anchor: walk.anchor(),
            boundary: walk.far(),
            reached: walk.overshoot,
        });
    }

    let (stub_type, explicit) = match walk.direction {
        Direction::Backward => (SchedulePeriodType::Initial, spec.ufront_stub),
        Direction::Forward => (SchedulePeriodType::Final, spec.uback_stub),
    };
    if let Some(date) = explicit {
        return Err(ScheduleError::StubConflict {
            reason: format!(
                "{stub} needs a second stub: regular periods from {} do not reach the explicit stub date {date}",
                walk.anchor(),
            ),
        });
    }

    let mut periods = UnadjustedPeriods::regular(walk.boundaries);
    let n = periods.period_types.len();
    // a long stub absorbs the regular period next to it, if there is one
    let merge = stub.is_long() && n > 1;
    match walk.direction {
        Direction::Backward => {
            if merge {
                periods.boundaries.remove(1);
                periods.period_types.remove(0);
            }
            periods.period_types[0] = stub_type;
        }
        Direction::Forward => {
            if merge {
                periods.boundaries.remove(n - 1);
                periods.period_types.remove(n - 1);
            }
            let last = periods.period_types.len() - 1;
            periods.period_types[last] = stub_type;
        }
    }
    Ok(periods)
}

fn resolve_both(
    forward: UnadjustedWalk,
    backward: UnadjustedWalk,
    meeting: WalkMeeting,
) -> ScheduleResult<UnadjustedPeriods> {
    if forward.exact {
        return Ok(UnadjustedPeriods::regular(forward.boundaries));
    }
    if backward.exact {
        return Ok(UnadjustedPeriods::regular(backward.boundaries));
    }
    match meeting.common {
        Some(date) => {
            let mut boundaries: Vec<NaiveDateTime> =
                forward.boundaries.into_iter().take_while(|d| *d < date).collect();
            boundaries.extend(backward.boundaries.into_iter().skip_while(|d| *d < date));
            Ok(UnadjustedPeriods::regular(boundaries))
        }
        None => Err(ScheduleError::UnreconciledWalks {
            start: forward.anchor(),
            end: backward.anchor(),
            forward: meeting.forward,
            backward: meeting.backward,
        }),
    }
}
