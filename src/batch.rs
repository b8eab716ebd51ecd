// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Element-wise batch layer.
//!
//! Every batch operation is defined as the element-wise application of its
//! scalar counterpart, through three combinators:
//!
//! * [`map`] for total operations;
//! * [`try_map`] for fallible ones, aborting on the first error;
//! * [`map_masked`] for fallible ones where partial results are wanted,
//!   yielding a [`Masked`] with a validity flag per element.
//!
//! The `*_batch` methods on [`TimeContext`] are thin wrappers over these;
//! there is no vectorized fast path to drift out of sync with the scalar
//! semantics.

use crate::convert::{TimeContext, TimeSystem};
use crate::errors::Result;

/// Applies a total scalar operation element-wise.
pub fn map<T, U, F>(input: &[T], f: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    input.iter().map(f).collect()
}

/// Applies a fallible scalar operation element-wise, stopping at the first
/// error.
pub fn try_map<T, U, F>(input: &[T], f: F) -> Result<Vec<U>>
where
    F: FnMut(&T) -> Result<U>,
{
    input.iter().map(f).collect()
}

/// Batch result with per-element validity.
///
/// `values` and `valid` have the input's length; where `valid[i]` is false,
/// `values[i]` is a placeholder default and the element's error was
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Masked<T> {
    pub values: Vec<T>,
    pub valid: Vec<bool>,
}

impl<T> Masked<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn all_valid(&self) -> bool {
        self.valid.iter().all(|&v| v)
    }

    /// The element at `i`, or `None` if it failed.
    pub fn get(&self, i: usize) -> Option<&T> {
        self.valid[i].then(|| &self.values[i])
    }
}

/// Applies a fallible scalar operation element-wise, masking failures
/// instead of aborting.
pub fn map_masked<T, U, F>(input: &[T], mut f: F) -> Masked<U>
where
    U: Default,
    F: FnMut(&T) -> Result<U>,
{
    let mut values = Vec::with_capacity(input.len());
    let mut valid = Vec::with_capacity(input.len());
    for item in input {
        match f(item) {
            Ok(v) => {
                values.push(v);
                valid.push(true);
            }
            Err(_) => {
                values.push(U::default());
                valid.push(false);
            }
        }
    }
    Masked { values, valid }
}

impl TimeContext {
    // -- time axes ----------------------------------------------------------

    pub fn time_from_time_batch(&self, from: TimeSystem, to: TimeSystem, times: &[f64]) -> Vec<f64> {
        map(times, |&t| self.time_from_time(from, to, t))
    }

    pub fn tai_from_day_sec_batch(&self, pairs: &[(i64, f64)]) -> Vec<f64> {
        map(pairs, |&(day, sec)| self.tai_from_day_sec(day, sec))
    }

    pub fn day_sec_from_tai_batch(&self, times: &[f64]) -> Vec<(i64, f64)> {
        map(times, |&t| self.day_sec_from_tai(t))
    }

    pub fn time_from_day_sec_batch(&self, system: TimeSystem, pairs: &[(i64, f64)]) -> Vec<f64> {
        map(pairs, |&(day, sec)| self.time_from_day_sec(system, day, sec))
    }

    pub fn day_sec_from_time_batch(&self, system: TimeSystem, times: &[f64]) -> Vec<(i64, f64)> {
        map(times, |&t| self.day_sec_from_time(system, t))
    }

    // -- MJD / JD -----------------------------------------------------------

    pub fn mjd_from_day_sec_batch(&self, pairs: &[(i64, f64)]) -> Vec<f64> {
        map(pairs, |&(day, sec)| self.mjd_from_day_sec(day, sec))
    }

    pub fn day_sec_from_mjd_batch(&self, mjds: &[f64]) -> Vec<(i64, f64)> {
        map(mjds, |&mjd| self.day_sec_from_mjd(mjd))
    }

    pub fn jd_from_day_sec_batch(&self, pairs: &[(i64, f64)]) -> Vec<f64> {
        map(pairs, |&(day, sec)| self.jd_from_day_sec(day, sec))
    }

    pub fn day_sec_from_jd_batch(&self, jds: &[f64]) -> Vec<(i64, f64)> {
        map(jds, |&jd| self.day_sec_from_jd(jd))
    }

    pub fn mjd_from_time_batch(&self, system: TimeSystem, times: &[f64]) -> Vec<f64> {
        map(times, |&t| self.mjd_from_time(system, t))
    }

    pub fn time_from_mjd_batch(&self, system: TimeSystem, mjds: &[f64]) -> Vec<f64> {
        map(mjds, |&mjd| self.time_from_mjd(system, mjd))
    }

    pub fn jd_from_time_batch(&self, system: TimeSystem, times: &[f64]) -> Vec<f64> {
        map(times, |&t| self.jd_from_time(system, t))
    }

    pub fn time_from_jd_batch(&self, system: TimeSystem, jds: &[f64]) -> Vec<f64> {
        map(jds, |&jd| self.time_from_jd(system, jd))
    }

    // -- day properties -----------------------------------------------------

    pub fn seconds_on_day_batch(&self, days: &[i64]) -> Vec<f64> {
        map(days, |&day| self.seconds_on_day(day))
    }

    pub fn leapsecs_on_day_batch(&self, days: &[i64]) -> Vec<i64> {
        map(days, |&day| self.leapsecs_on_day(day))
    }

    pub fn tai_minus_utc_batch(&self, days: &[i64]) -> Vec<f64> {
        map(days, |&day| self.tai_minus_utc(day))
    }

    /// Reverse offset lookup; fails on the first offset never tabulated.
    pub fn day_from_offset_batch(&self, offsets: &[f64]) -> Result<Vec<i64>> {
        try_map(offsets, |&q| self.leapsecs().day_from_offset(q))
    }

    /// Reverse offset lookup with untabulated offsets masked out.
    pub fn day_from_offset_batch_masked(&self, offsets: &[f64]) -> Masked<i64> {
        map_masked(offsets, |&q| self.leapsecs().day_from_offset(q))
    }

    // -- calendar -----------------------------------------------------------

    /// Fails on the first invalid date.
    pub fn day_from_ymd_batch(&self, ymds: &[(i64, u32, u32)], proleptic: bool) -> Result<Vec<i64>> {
        try_map(ymds, |&(y, m, d)| self.calendar().day_from_ymd(y, m, d, proleptic))
    }

    /// Masks invalid dates instead of failing.
    pub fn day_from_ymd_batch_masked(
        &self,
        ymds: &[(i64, u32, u32)],
        proleptic: bool,
    ) -> Masked<i64> {
        map_masked(ymds, |&(y, m, d)| self.calendar().day_from_ymd(y, m, d, proleptic))
    }

    pub fn ymd_from_day_batch(&self, days: &[i64], proleptic: bool) -> Vec<(i64, u32, u32)> {
        map(days, |&day| self.calendar().ymd_from_day(day, proleptic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TimeError;

    #[test]
    fn map_preserves_order_and_length() {
        let out = map(&[1, 2, 3], |&x| x * 2);
        assert_eq!(out, vec![2, 4, 6]);
        assert!(map(&[] as &[i32], |&x| x).is_empty());
    }

    #[test]
    fn try_map_aborts_on_first_error() {
        let out: Result<Vec<i32>> = try_map(&[1, 2, 3], |&x| {
            if x == 2 {
                Err(TimeError::InvalidCalendarDate("two".into()))
            } else {
                Ok(x)
            }
        });
        assert!(matches!(out, Err(TimeError::InvalidCalendarDate(_))));
    }

    #[test]
    fn map_masked_keeps_going() {
        let out = map_masked(&[1, 2, 3], |&x| {
            if x == 2 {
                Err(TimeError::InvalidCalendarDate("two".into()))
            } else {
                Ok(x * 10)
            }
        });
        assert_eq!(out.values, vec![10, 0, 30]);
        assert_eq!(out.valid, vec![true, false, true]);
        assert!(!out.all_valid());
        assert_eq!(out.get(0), Some(&10));
        assert_eq!(out.get(1), None);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn batch_matches_scalar_including_edges() {
        let ctx = TimeContext::default();
        // A leap-second boundary, a rubber-era day, a far-future day.
        let pairs = [
            (0i64, 0.0f64),
            (6_209, 86_400.5),
            (-14_000, 100.0),
            (40_000, 43_200.0),
        ];
        let batch = ctx.tai_from_day_sec_batch(&pairs);
        for (i, &(day, sec)) in pairs.iter().enumerate() {
            assert_eq!(batch[i], ctx.tai_from_day_sec(day, sec));
        }

        let back = ctx.day_sec_from_tai_batch(&batch);
        for (i, &tai) in batch.iter().enumerate() {
            assert_eq!(back[i], ctx.day_sec_from_tai(tai));
        }

        let days = [-14_240, 0, 6_209, 40_000];
        assert_eq!(
            ctx.seconds_on_day_batch(&days),
            days.iter().map(|&d| ctx.seconds_on_day(d)).collect::<Vec<_>>()
        );
        assert_eq!(ctx.leapsecs_on_day_batch(&days), vec![0, 0, 1, 0]);
    }

    #[test]
    fn offset_and_mjd_batches_match_scalar() {
        let ctx = TimeContext::default();

        let days = [-20_000i64, -14_000, 0, 6_209, 40_000];
        assert_eq!(
            ctx.tai_minus_utc_batch(&days),
            days.iter().map(|&d| ctx.tai_minus_utc(d)).collect::<Vec<_>>()
        );

        let offsets = [10.0, 37.0];
        assert_eq!(ctx.day_from_offset_batch(&offsets).unwrap(), vec![-10_228, 6_209]);
        assert!(ctx.day_from_offset_batch(&[37.0, 12.345]).is_err());
        let masked = ctx.day_from_offset_batch_masked(&[37.0, 12.345]);
        assert_eq!(masked.valid, vec![true, false]);
        assert_eq!(masked.get(0), Some(&6_209));

        for system in [TimeSystem::TAI, TimeSystem::UTC, TimeSystem::TT] {
            let times = [0.0, 43_200.0, 536_544_000.5];
            let mjds = ctx.mjd_from_time_batch(system, &times);
            let jds = ctx.jd_from_time_batch(system, &times);
            for (i, &t) in times.iter().enumerate() {
                assert_eq!(mjds[i], ctx.mjd_from_time(system, t));
                assert_eq!(jds[i], ctx.jd_from_time(system, t));
            }
            assert_eq!(
                ctx.time_from_mjd_batch(system, &mjds),
                mjds.iter().map(|&m| ctx.time_from_mjd(system, m)).collect::<Vec<_>>()
            );
            assert_eq!(
                ctx.time_from_jd_batch(system, &jds),
                jds.iter().map(|&j| ctx.time_from_jd(system, j)).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn calendar_batches_propagate_and_mask_errors() {
        let ctx = TimeContext::default();
        let good = [(2000, 1, 1), (2000, 2, 29), (1582, 10, 4)];
        let days = ctx.day_from_ymd_batch(&good, false).unwrap();
        assert_eq!(days[0], 0);
        assert_eq!(ctx.ymd_from_day_batch(&days, false), good.to_vec());

        let mixed = [(2000, 1, 1), (2001, 2, 29), (2000, 13, 1)];
        assert!(ctx.day_from_ymd_batch(&mixed, false).is_err());

        let masked = ctx.day_from_ymd_batch_masked(&mixed, false);
        assert_eq!(masked.valid, vec![true, false, false]);
        assert_eq!(masked.get(0), Some(&0));
    }
}
