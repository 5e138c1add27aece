use crate::json::JSON;
use crate::scheduling::{
    Adjuster, BusinessDayAdjustment, Cal, Calendar, Frequency, NamedCal, RollDay, Schedule,
    SchedulePeriod, ScheduleSpecification, StubConvention, UnionCal,
};

impl JSON for Cal {}
impl JSON for UnionCal {}
impl JSON for NamedCal {}
impl JSON for Calendar {}
impl JSON for Adjuster {}
impl JSON for BusinessDayAdjustment {}
impl JSON for RollDay {}
impl JSON for Frequency {}
impl JSON for StubConvention {}
impl JSON for ScheduleSpecification {}
impl JSON for SchedulePeriod {}
impl JSON for Schedule {}
