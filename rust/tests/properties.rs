use crate::error::ScheduleError;
use crate::scheduling::{
    ndt, Adjuster, Adjustment, Cal, Frequency, Schedule, ScheduleSpecification, StubConvention,
};
use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (2000i32..2060i32, 1u32..13u32, 1u32..=31u32).prop_filter_map("valid date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| date.and_time(NaiveTime::MIN))
    })
}

// days of month up to 27 are never month end dates
fn mid_month_date_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (2000i32..2060i32, 1u32..13u32, 1u32..28u32).prop_map(|(y, m, d)| ndt(y, m, d))
}

fn months_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![1u32, 2, 3, 4, 6, 12])
}

fn stub_strategy() -> impl Strategy<Value = StubConvention> {
    prop::sample::select(vec![
        StubConvention::None,
        StubConvention::ShortInitial,
        StubConvention::LongInitial,
        StubConvention::ShortFinal,
        StubConvention::LongFinal,
        StubConvention::Both,
    ])
}

fn adjuster_strategy() -> impl Strategy<Value = Adjuster> {
    prop::sample::select(vec![
        Adjuster::Actual {},
        Adjuster::Following {},
        Adjuster::ModifiedFollowing {},
        Adjuster::Previous {},
        Adjuster::ModifiedPrevious {},
        Adjuster::ModifiedFollowingBiMonthly {},
        Adjuster::Nearest {},
    ])
}

fn holiday_cal() -> Cal {
    Cal::new(
        vec![ndt(2024, 12, 25), ndt(2024, 12, 26), ndt(2025, 1, 1), ndt(2025, 5, 30)],
        vec![5, 6],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn periods_tile_the_range(
        start in date_strategy(),
        days in 1u64..3000u64,
        months in months_strategy(),
        stub in stub_strategy(),
    ) {
        let end = start + Days::new(days);
        let spec = ScheduleSpecification::try_new(start, end, Frequency::Months { number: months })
            .unwrap()
            .with_stub(stub);
        let schedule = match (Schedule::try_new(&spec), stub) {
            (Ok(schedule), _) => schedule,
            (Err(ScheduleError::StubNotAllowed { .. }), StubConvention::None) => return Ok(()),
            (Err(ScheduleError::UnreconciledWalks { .. }), StubConvention::Both) => return Ok(()),
            (Err(err), _) => return Err(TestCaseError::fail(format!("{stub}: {err}"))),
        };
        let periods = schedule.periods();
        prop_assert_eq!(start, periods[0].ustart);
        prop_assert_eq!(end, periods[periods.len() - 1].uend);
        for p in periods {
            prop_assert!(p.ustart < p.uend);
        }
        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].uend, pair[1].ustart);
        }
        prop_assert_eq!(schedule.uschedule().len(), schedule.len() + 1);
    }

    #[test]
    fn adjustment_is_idempotent(
        date in date_strategy(),
        offset in 0u64..400u64,
        adjuster in adjuster_strategy(),
    ) {
        let cal = holiday_cal();
        let udate = date + Days::new(offset);
        let adate = adjuster.adjust(&udate, &cal);
        prop_assert_eq!(adate, adjuster.adjust(&adate, &cal));
    }

    #[test]
    fn regular_range_round_trip(
        start in date_strategy(),
        count in 1u32..40u32,
        months in months_strategy(),
    ) {
        let end = start + Months::new(count * months);
        let spec = ScheduleSpecification::try_new(start, end, Frequency::Months { number: months })
            .unwrap()
            .with_stub(StubConvention::None);
        let schedule = Schedule::try_new(&spec).unwrap();
        prop_assert!(schedule.is_regular());
        prop_assert_eq!(count as usize, schedule.len());

        let uschedule = schedule.uschedule();
        let rebuilt = ScheduleSpecification::try_new(
            uschedule[0],
            uschedule[uschedule.len() - 1],
            schedule.frequency(),
        )
        .unwrap();
        prop_assert_eq!(spec.ueffective(), rebuilt.ueffective());
        prop_assert_eq!(spec.utermination(), rebuilt.utermination());
        prop_assert_eq!(spec.frequency(), rebuilt.frequency());
    }

    #[test]
    fn stub_none_fails_on_uneven_range(
        start in mid_month_date_strategy(),
        count in 1u32..40u32,
        extra in 1u64..28u64,
    ) {
        let end = start + Months::new(count) + Days::new(extra);
        let spec = ScheduleSpecification::try_new(start, end, Frequency::Months { number: 1 })
            .unwrap()
            .with_stub(StubConvention::None);
        let result = Schedule::try_new(&spec);
        prop_assert!(matches!(result, Err(ScheduleError::StubNotAllowed { .. })), "{:?}", result);
    }
}
