// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! End-to-end checks across the calendar, leap-second, and conversion
//! layers.

use chrono::{DateTime, Utc};
use chronoscale::{
    LeapSecondEntry, PostTableModel, PreTableModel, TimeContext, TimeError, TimeSystem, UtModel,
};

#[test]
fn calendar_and_tai_roundtrip_across_all_eras() {
    let ctx = TimeContext::default();
    // Dates spanning the ΔT era, the rubber-second era, the step era, and
    // the extrapolated future.
    let dates = [
        (1000i64, 6u32, 15u32),
        (1582, 10, 4),
        (1582, 10, 15),
        (1961, 3, 1),
        (1971, 12, 31),
        (1999, 12, 31),
        (2016, 12, 31),
        (2100, 1, 1),
    ];
    for &(y, m, d) in &dates {
        let day = ctx.calendar().day_from_ymd(y, m, d, false).unwrap();
        assert_eq!(ctx.calendar().ymd_from_day(day, false), (y, m, d));

        let tai = ctx.tai_from_day_sec(day, 10.5);
        let (day2, sec2) = ctx.day_sec_from_tai(tai);
        assert_eq!(day2, day, "{y}-{m}-{d}");
        assert!((sec2 - 10.5).abs() < 1e-5, "{y}-{m}-{d}: {sec2}");
    }
}

#[test]
fn leap_second_instants_stay_distinct() {
    let ctx = TimeContext::default();
    let leap_day = ctx.calendar().day_from_ymd(2016, 12, 31, false).unwrap();
    assert_eq!(ctx.seconds_on_day(leap_day), 86_401.0);
    assert_eq!(ctx.leapsecs_on_day(leap_day), 1);

    // 23:59:60 and the following 00:00:00 are one TAI second apart.
    let inside = ctx.tai_from_day_sec(leap_day, 86_400.0);
    let midnight = ctx.tai_from_day_sec(leap_day + 1, 0.0);
    assert_eq!(midnight - inside, 1.0);

    // Splitting recovers the leap second, not the next midnight.
    let (d, s) = ctx.day_sec_from_tai(inside);
    assert_eq!(d, leap_day);
    assert!((s - 86_400.0).abs() < 1e-6);
}

#[test]
fn every_system_roundtrips_through_every_other() {
    let ctx = TimeContext::default();
    let systems = [
        TimeSystem::TAI,
        TimeSystem::UTC,
        TimeSystem::TT,
        TimeSystem::TDB,
    ];
    let tai = ctx.tai_from_day_sec(4_564, 43_201.0); // a 2012 leap day
    for &a in &systems {
        let ta = ctx.time_from_tai(a, tai);
        for &b in &systems {
            let tb = ctx.time_from_time(a, b, ta);
            let back = ctx.time_from_time(b, a, tb);
            assert!(
                (back - ta).abs() < 1e-5,
                "{a} -> {b} -> {a}: {back} vs {ta}"
            );
        }
    }
}

#[test]
fn rubber_second_era_day_lengths_and_conversions() {
    let ctx = TimeContext::default();
    let day = ctx.calendar().day_from_ymd(1961, 6, 1, false).unwrap();
    let len = ctx.seconds_on_day(day);
    assert!((len - 86_400.001_296).abs() < 1e-9, "1961-06-01: {len}");
    assert_eq!(ctx.leapsecs_on_day(day), 0);

    let tai = ctx.tai_from_day_sec(day, 50_000.0);
    let (d, s) = ctx.day_sec_from_tai(tai);
    assert_eq!(d, day);
    assert!((s - 50_000.0).abs() < 1e-5);
}

#[test]
fn inserting_a_leap_second_shifts_later_conversions() {
    let mut ctx = TimeContext::default();
    let pristine = TimeContext::default();

    let day = ctx.calendar().day_from_ymd(2035, 6, 30, false).unwrap();
    ctx.insert_leap_second(day, 1).unwrap();

    assert_eq!(ctx.seconds_on_day(day), 86_401.0);
    assert_eq!(ctx.tai_minus_utc(day), 38.0);
    assert_eq!(ctx.leapsecs().day_from_offset(38.0).unwrap(), day);

    // Instants before the insertion are untouched; after it, TAI gains one
    // second relative to the pristine context.
    assert_eq!(
        ctx.tai_from_day_sec(day, 0.0),
        pristine.tai_from_day_sec(day, 0.0)
    );
    assert_eq!(
        ctx.tai_from_day_sec(day + 1, 0.0) - pristine.tai_from_day_sec(day + 1, 0.0),
        1.0
    );
}

#[test]
fn custom_leap_second_table_replaces_the_bundled_one() {
    let mut ctx = TimeContext::default();
    ctx.load_leap_seconds(vec![
        LeapSecondEntry::step(-1_000, 30.0),
        LeapSecondEntry::step(2_000, 31.0),
    ])
    .unwrap();
    assert_eq!(ctx.tai_minus_utc(0), 30.0);
    assert_eq!(ctx.seconds_on_day(2_000), 86_401.0);
    // The 2016 leap second is gone with the bundled table.
    assert_eq!(ctx.seconds_on_day(6_209), 86_400.0);
}

#[test]
fn ut_models_only_differ_outside_the_table() {
    let flat = TimeContext::default();
    let mut dt = TimeContext::default();
    dt.set_ut_model(UtModel::new(PreTableModel::DeltaT, PostTableModel::DeltaT));

    for day in [-10_000, 0, 6_209] {
        assert_eq!(flat.tai_minus_utc(day), dt.tai_minus_utc(day), "day {day}");
    }
    let future = 40_000;
    assert_eq!(flat.tai_minus_utc(future), 37.0);
    assert!(dt.tai_minus_utc(future) > 100.0);
}

#[test]
fn mjd_and_jd_anchors() {
    let ctx = TimeContext::default();
    // The MJD epoch, 1858-11-17.
    let day = ctx.calendar().day_from_ymd(1858, 11, 17, false).unwrap();
    assert_eq!(ctx.mjd_from_day(day), 0);
    assert_eq!(ctx.jd_from_day_sec(day, 0.0), 2_400_000.5);

    // J2000 noon.
    assert_eq!(ctx.jd_from_day_sec(0, 43_200.0), 2_451_545.0);

    let (d, s) = ctx.day_sec_from_jd(2_451_545.0);
    assert_eq!(d, 0);
    assert!((s - 43_200.0).abs() < 1e-4);
}

#[test]
fn batch_results_equal_scalar_results() {
    let ctx = TimeContext::default();
    let pairs = [
        (-14_000i64, 0.0f64), // rubber era
        (0, 43_200.0),
        (6_209, 86_400.5), // inside a leap second
        (40_000, 1.0),     // beyond the table
    ];
    let batch = ctx.time_from_day_sec_batch(TimeSystem::TDB, &pairs);
    for (i, &(day, sec)) in pairs.iter().enumerate() {
        assert_eq!(batch[i], ctx.time_from_day_sec(TimeSystem::TDB, day, sec));
    }

    let mjds = ctx.mjd_from_day_sec_batch(&pairs);
    let split = ctx.day_sec_from_mjd_batch(&mjds);
    for (i, &(day, _)) in pairs.iter().enumerate() {
        assert_eq!(split[i].0, day);
    }

    let days: Vec<i64> = pairs.iter().map(|&(d, _)| d).collect();
    assert_eq!(
        ctx.tai_minus_utc_batch(&days),
        days.iter().map(|&d| ctx.tai_minus_utc(d)).collect::<Vec<_>>()
    );

    let times = ctx.tai_from_day_sec_batch(&pairs);
    let axis_mjds = ctx.mjd_from_time_batch(TimeSystem::TAI, &times);
    for (i, &t) in times.iter().enumerate() {
        assert_eq!(axis_mjds[i], ctx.mjd_from_time(TimeSystem::TAI, t));
    }
    assert_eq!(
        ctx.time_from_jd_batch(TimeSystem::TT, &ctx.jd_from_time_batch(TimeSystem::TT, &times)),
        times
            .iter()
            .map(|&t| ctx.time_from_jd(TimeSystem::TT, ctx.jd_from_time(TimeSystem::TT, t)))
            .collect::<Vec<_>>()
    );

    assert_eq!(ctx.day_from_offset_batch(&[37.0]).unwrap(), vec![6_209]);
    assert_eq!(
        ctx.day_from_offset_batch_masked(&[37.0, 0.123]).valid,
        vec![true, false]
    );
}

#[test]
fn invalid_dates_are_rejected_not_clamped() {
    let ctx = TimeContext::default();
    for (y, m, d) in [(2001i64, 2u32, 29u32), (2000, 13, 1), (1582, 10, 10)] {
        let err = ctx.calendar().day_from_ymd(y, m, d, false).unwrap_err();
        assert!(
            matches!(err, TimeError::InvalidCalendarDate(_)),
            "{y}-{m}-{d}"
        );
    }
    // The masked batch surfaces the same failures element-wise.
    let masked = ctx.day_from_ymd_batch_masked(&[(2000, 1, 1), (2001, 2, 29)], false);
    assert_eq!(masked.valid, vec![true, false]);
}

#[test]
fn chrono_timestamps_roundtrip_through_the_context() {
    let ctx = TimeContext::default();
    // 2012-06-30T23:59:60.25Z, the 2012 leap second.
    let leap = DateTime::<Utc>::from_timestamp(1_341_100_799, 1_250_000_000).unwrap();
    let (day, sec) = ctx.day_sec_from_datetime(&leap);
    assert_eq!(day, 4_564);
    assert!((sec - 86_400.25).abs() < 1e-9);

    let back = ctx.datetime_from_day_sec(day, sec).unwrap();
    assert_eq!(back, leap);

    // An ordinary pre-2000 instant.
    let dt = DateTime::<Utc>::from_timestamp(0, 500_000_000).unwrap();
    let (day, sec) = ctx.day_sec_from_datetime(&dt);
    assert_eq!(day, -10_957);
    assert!((sec - 0.5).abs() < 1e-9);
    assert_eq!(ctx.datetime_from_day_sec(day, sec).unwrap(), dt);
}

#[test]
fn moved_gregorian_start_changes_historical_dates_only() {
    let mut ctx = TimeContext::default();
    let before = ctx.calendar().day_from_ymd(2000, 1, 1, false).unwrap();
    ctx.set_gregorian_start(1752, 9, 14).unwrap();
    assert_eq!(ctx.calendar().day_from_ymd(2000, 1, 1, false).unwrap(), before);
    // 1700 is a leap year under Julian rules, which now cover it.
    assert!(ctx.calendar().day_from_ymd(1700, 2, 29, false).is_ok());
}

#[cfg(feature = "serde")]
#[test]
fn context_serializes_with_its_table() {
    let mut ctx = TimeContext::default();
    ctx.insert_leap_second(12_000, 1).unwrap();
    let json = serde_json::to_string(&ctx).unwrap();
    let back: TimeContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ctx);
    assert_eq!(back.seconds_on_day(12_000), 86_401.0);
}
