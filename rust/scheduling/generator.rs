//! Unadjusted period generation: walks of regular periods from an anchor date.

use chrono::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::scheduling::{Frequency, ResolvedSpecification, RollDay, Scheduling, StubConvention};

/// The direction in which regular periods are measured away from an anchor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// From the start of the range towards its end.
    Forward,
    /// From the end of the range towards its start.
    Backward,
}

/// The boundaries of regular periods measured from an anchor towards a far boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct UnadjustedWalk {
    /// Ascending boundaries, including both the anchor and the far boundary.
    pub boundaries: Vec<NaiveDateTime>,
    /// Whether the last regular period lands exactly on the far boundary.
    pub exact: bool,
    /// The first stepped date that met or crossed the far boundary.
    pub overshoot: NaiveDateTime,
    pub direction: Direction,
}

impl UnadjustedWalk {
    /// The date the walk started from.
    pub fn anchor(&self) -> NaiveDateTime {
        match self.direction {
            Direction::Forward => self.boundaries[0],
            Direction::Backward => self.boundaries[self.boundaries.len() - 1],
        }
    }

    /// The boundary the walk stepped towards.
    pub fn far(&self) -> NaiveDateTime {
        match self.direction {
            Direction::Forward => self.boundaries[self.boundaries.len() - 1],
            Direction::Backward => self.boundaries[0],
        }
    }

    /// Regular period boundaries strictly between the anchor and the far boundary.
    pub fn inner(&self) -> &[NaiveDateTime] {
        &self.boundaries[1..self.boundaries.len() - 1]
    }
}

/// Where a forward walk and a backward walk over the same range meet.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkMeeting {
    /// The earliest boundary common to both walks, if any.
    pub common: Option<NaiveDateTime>,
    /// The last regular boundary of the forward walk before the range end.
    pub forward: NaiveDateTime,
    /// The first regular boundary of the backward walk after the range start.
    pub backward: NaiveDateTime,
}

/// The output of the generator, consumed by the stub resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum Walks {
    /// The range is a single period and no walk is made.
    Term,
    /// One walk from the anchor implied by the stub convention.
    Single(UnadjustedWalk),
    /// Independent walks from both ends of the range.
    Both {
        forward: UnadjustedWalk,
        backward: UnadjustedWalk,
        meeting: WalkMeeting,
    },
}

/// Generate the unadjusted regular period boundaries for a resolved specification.
///
/// # Notes
/// The anchor is the end of the regular range for `*_INITIAL` conventions and its start for
/// `*_FINAL` and `NONE`. For `BOTH` two independent walks are made and the point where they
/// meet is reported. Explicit stub dates are excluded: walks cover only the regular range.
pub fn generate(spec: &ResolvedSpecification) -> ScheduleResult<Walks> {
    if spec.is_term() {
        return Ok(Walks::Term);
    }
    let (ustart, uend) = spec.regular_range();
    let walks = match spec.stub() {
        StubConvention::None | StubConvention::ShortFinal | StubConvention::LongFinal => {
            Walks::Single(walk(
                &spec.frequency,
                &spec.start_roll,
                &ustart,
                &uend,
                Direction::Forward,
            )?)
        }
        StubConvention::ShortInitial | StubConvention::LongInitial => Walks::Single(walk(
            &spec.frequency,
            &spec.end_roll,
            &uend,
            &ustart,
            Direction::Backward,
        )?),
        StubConvention::Both => {
            let forward = walk(
                &spec.frequency,
                &spec.start_roll,
                &ustart,
                &uend,
                Direction::Forward,
            )?;
            let backward = walk(
                &spec.frequency,
                &spec.end_roll,
                &uend,
                &ustart,
                Direction::Backward,
            )?;
            let meeting = meet(&forward, &backward);
            debug!("Walks meet: {:?}", meeting);
            Walks::Both {
                forward,
                backward,
                meeting,
            }
        }
    };
    Ok(walks)
}

/// Walk regular periods from `anchor` towards `far`, aligning every stepped date to `roll`.
///
/// The walk stops at the first stepped date that meets or crosses `far`. Returned boundaries
/// are ascending and include both `anchor` and `far`.
pub fn walk(
    frequency: &Frequency,
    roll: &RollDay,
    anchor: &NaiveDateTime,
    far: &NaiveDateTime,
    direction: Direction,
) -> ScheduleResult<UnadjustedWalk> {
    roll.check_frequency(frequency)?;
    roll.validate_anchor(anchor)?;

    let sign = match direction {
        Direction::Forward => 1,
        Direction::Backward => -1,
    };
    let beyond = |date: &NaiveDateTime| match direction {
        Direction::Forward => date >= far,
        Direction::Backward => date <= far,
    };

    let mut dates: Vec<NaiveDateTime> = vec![*anchor];
    let mut steps: i32 = 1;
    let overshoot = loop {
        let date = frequency.try_ustep(anchor, sign * steps, roll)?;
        let previous = dates[dates.len() - 1];
        if (date - previous).num_days() * i64::from(sign) <= 0 {
            return Err(ScheduleError::InvalidFrequency {
                reason: format!("{frequency} with roll {roll} does not advance from {previous}"),
            });
        }
        if beyond(&date) {
            break date;
        }
        dates.push(date);
        steps = steps.checked_add(1).ok_or_else(|| ScheduleError::DateOverflow {
            reason: format!("too many periods between {anchor} and {far}"),
        })?;
    };
    dates.push(*far);
    if direction == Direction::Backward {
        dates.reverse();
    }

    let exact = overshoot == *far;
    debug!(
        "Walk {:?} from {} to {}: {} regular boundaries, exact {}",
        direction,
        anchor,
        far,
        dates.len() - 1,
        exact
    );
    Ok(UnadjustedWalk {
        boundaries: dates,
        exact,
        overshoot,
        direction,
    })
}

/// Report where a forward and a backward walk over the same range meet.
pub fn meet(forward: &UnadjustedWalk, backward: &UnadjustedWalk) -> WalkMeeting {
    let common = forward
        .inner()
        .iter()
        .find(|d| backward.inner().binary_search(d).is_ok())
        .copied();
    let forward_last = forward.boundaries[forward.boundaries.len() - 2];
    let backward_first = backward.boundaries[1];
    WalkMeeting {
        common,
        forward: forward_last,
        backward: backward_first,
    }
}
