// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Time systems and the conversion context.
//!
//! Every conversion runs through an explicit [`TimeContext`] bundling the
//! three configurable pieces: the [`Calendar`], the [`LeapSecondTable`], and
//! the [`UtModel`]. Nothing is global; two contexts with different tables
//! coexist and disagree peacefully.
//!
//! # Axes
//!
//! | Quantity | Meaning |
//! |----------|---------|
//! | `day: i64` | calendar day count, day 0 = 2000-01-01 |
//! | `sec: f64` | seconds into the UTC day, `0 ≤ sec < seconds_on_day(day)` |
//! | `time: f64` | seconds on a [`TimeSystem`] axis from its 2000-01-01T00:00:00 |
//!
//! All four axes are anchored so that `tai = utc = 0.0` at
//! 2000-01-01T00:00:00 UTC; at that same instant `tt = 32.184` and `tdb`
//! differs from `tt` by the ≈1.7 ms periodic term. UTC's `time` axis is the
//! *nominal* continuous count `86400·day + sec`; during a positive leap
//! second it overlaps the next day's start, so only the `(day, sec)` form is
//! lossless there.
//!
//! TAI is the pivot: every cross-system conversion goes through it.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::calendar::Calendar;
use crate::errors::{Result, TimeError};
use crate::leapsecs::{LeapSecondEntry, LeapSecondTable};
use crate::ut_model::UtModel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `TT = TAI + 32.184 s`.
pub const TT_MINUS_TAI: f64 = 32.184;

/// MJD of day 0 (2000-01-01).
pub const MJD_OF_JAN_1_2000: i64 = 51_544;

/// `JD = MJD + 2 400 000.5`.
pub const JD_MINUS_MJD: f64 = 2_400_000.5;

/// Days from 1970-01-01 (the Unix epoch) to 2000-01-01.
const UNIX_DAYS_TO_2000: i64 = 10_957;

const DAY_SECS: f64 = 86_400.0;

/// The time systems this crate converts between.
///
/// A closed set: downstream code matches on it exhaustively, and adding a
/// system is a deliberate API change rather than a stringly-typed extension.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeSystem {
    /// International Atomic Time, the pivot axis.
    TAI,
    /// Coordinated Universal Time (nominal continuous form on the `time`
    /// axis; use `(day, sec)` to address leap seconds).
    UTC,
    /// Terrestrial Time, `TAI + 32.184 s`.
    TT,
    /// Barycentric Dynamical Time, TT plus a periodic relativistic term.
    TDB,
}

impl fmt::Display for TimeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeSystem::TAI => "TAI",
            TimeSystem::UTC => "UTC",
            TimeSystem::TT => "TT",
            TimeSystem::TDB => "TDB",
        })
    }
}

/// TDB − TT in seconds, Fairhead & Bretagnon (1990) four largest periodic
/// terms. Better than 30 μs within ±100 centuries of J2000.
///
/// `tt` is seconds on the TT axis (J2000 itself sits at `tt = 43_200`).
#[inline]
pub fn tdb_minus_tt(tt: f64) -> f64 {
    // Julian centuries from J2000.0 on the TT axis.
    let t = (tt - 43_200.0) / (36_525.0 * DAY_SECS);

    // Earth's mean anomaly (radians)
    let m_e = (357.529_109_2 + 35_999.050_290_9 * t).to_radians();
    // Mean anomaly of Jupiter (radians)
    let m_j = (246.4512 + 3_035.2335 * t).to_radians();
    // Mean elongation of the Moon from the Sun (radians)
    let d = (297.850_204_2 + 445_267.111_516_8 * t).to_radians();
    // Mean longitude of the lunar ascending node (radians)
    let om = (125.044_555_0 - 1_934.136_209_1 * t).to_radians();

    0.001_657 * (m_e + 0.016_71 * m_e.sin()).sin()
        + 0.000_022 * (d - m_e).sin()
        + 0.000_014 * (2.0 * d).sin()
        + 0.000_005 * m_j.sin()
        + 0.000_005 * om.sin()
}

/// Splits seconds-of-day into numeric (hour, minute, second) components.
///
/// Values at or past 86 400 stay in the final minute, so second 86 400.5 of
/// a leap day reads `(23, 59, 60.5)`. Formatting is a caller concern.
pub fn hms_from_sec(sec: f64) -> (u32, u32, f64) {
    let h = ((sec / 3_600.0).floor() as i64).clamp(0, 23) as u32;
    let rem = sec - 3_600.0 * h as f64;
    let m = ((rem / 60.0).floor() as i64).clamp(0, 59) as u32;
    (h, m, rem - 60.0 * m as f64)
}

/// Seconds-of-day for numeric (hour, minute, second) components; the inverse
/// of [`hms_from_sec`].
pub fn sec_from_hms(h: u32, m: u32, s: f64) -> f64 {
    3_600.0 * h as f64 + 60.0 * m as f64 + s
}

/// Conversion context: calendar + leap-second table + era policy.
///
/// `Default` gives the proleptic setup most callers want: Gregorian from
/// 1582-10-15 with Julian dates before, the bundled 1961–2017 table, ΔT
/// before it and flat extrapolation after. Mutators take `&mut self`, so a
/// shared context is configured before it is shared.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeContext {
    calendar: Calendar,
    leapsecs: LeapSecondTable,
    ut_model: UtModel,
}

impl TimeContext {
    pub fn new(calendar: Calendar, leapsecs: LeapSecondTable, ut_model: UtModel) -> Self {
        Self { calendar, leapsecs, ut_model }
    }

    // -- configuration ------------------------------------------------------

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn leapsecs(&self) -> &LeapSecondTable {
        &self.leapsecs
    }

    pub fn ut_model(&self) -> &UtModel {
        &self.ut_model
    }

    /// Moves the Julian→Gregorian transition. Fails (keeping the previous
    /// start) unless `(y, m, d)` is a valid proleptic Gregorian date.
    pub fn set_gregorian_start(&mut self, y: i64, m: u32, d: u32) -> Result<()> {
        self.calendar.set_gregorian_start(y, m, d)
    }

    /// All-Gregorian mode: no Julian dates, however early.
    pub fn suppress_julian(&mut self) {
        self.calendar.suppress_julian();
    }

    /// Replaces the leap-second table; all-or-nothing.
    pub fn load_leap_seconds(&mut self, entries: Vec<LeapSecondEntry>) -> Result<()> {
        self.leapsecs.load(entries)
    }

    /// Registers a leap second of `delta` whole seconds contained in `day`.
    pub fn insert_leap_second(&mut self, day: i64, delta: i64) -> Result<()> {
        self.leapsecs.insert(day, delta)
    }

    pub fn set_ut_model(&mut self, model: UtModel) {
        self.ut_model = model;
    }

    // -- day properties -----------------------------------------------------

    /// Cumulative TAI−UTC in seconds on `day`.
    pub fn tai_minus_utc(&self, day: i64) -> f64 {
        self.ut_model.tai_minus_utc(&self.leapsecs, day)
    }

    /// Length of UTC day `day` in SI seconds.
    pub fn seconds_on_day(&self, day: i64) -> f64 {
        self.ut_model.seconds_on_day(&self.leapsecs, day)
    }

    /// Whole leap seconds contained in `day`.
    pub fn leapsecs_on_day(&self, day: i64) -> i64 {
        self.ut_model.leapsecs_on_day(&self.leapsecs, day)
    }

    // -- the pivot axis -----------------------------------------------------

    /// TAI seconds at `sec` into UTC day `day`.
    ///
    /// The day's start in TAI is `86400·day + Ω(day−1) − Ω(−1)`; the offset
    /// of the *previous* day anchors the start because `Ω(day)` already
    /// includes any leap second the day itself contains. `sec` may run to
    /// `seconds_on_day(day)` exclusive, so leap seconds address cleanly.
    pub fn tai_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        DAY_SECS * day as f64 + self.tai_minus_utc(day - 1) - self.tai_minus_utc(-1) + sec
    }

    /// Splits a TAI value into `(day, sec)` with `0 ≤ sec < seconds_on_day`.
    pub fn day_sec_from_tai(&self, tai: f64) -> (i64, f64) {
        // The nominal estimate can be off by a few days deep in the ΔT era
        // (Ω reaches ~1.25 days near year −4000), so walk to the bracketing
        // day starts.
        let mut day = (tai / DAY_SECS).floor() as i64;
        while tai < self.tai_from_day_sec(day, 0.0) {
            day -= 1;
        }
        while tai >= self.tai_from_day_sec(day + 1, 0.0) {
            day += 1;
        }
        let sec = tai - self.tai_from_day_sec(day, 0.0);
        (day, sec.max(0.0))
    }

    // -- per-system axes ----------------------------------------------------

    /// Nominal continuous UTC, `86400·day + sec`. During a positive leap
    /// second this overlaps the next day's start; the overlap resolves to
    /// the later day on the way back.
    pub fn utc_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        DAY_SECS * day as f64 + sec
    }

    /// Splits nominal UTC into `(day, sec)` with `0 ≤ sec < 86400`.
    pub fn day_sec_from_utc(&self, utc: f64) -> (i64, f64) {
        let day = (utc / DAY_SECS).floor() as i64;
        (day, utc - DAY_SECS * day as f64)
    }

    /// TAI for a value on `system`'s axis.
    pub fn tai_from_time(&self, system: TimeSystem, time: f64) -> f64 {
        match system {
            TimeSystem::TAI => time,
            TimeSystem::UTC => {
                let (day, sec) = self.day_sec_from_utc(time);
                self.tai_from_day_sec(day, sec)
            }
            TimeSystem::TT => time - TT_MINUS_TAI,
            TimeSystem::TDB => {
                // Solve tdb = tt + (TDB − TT)(tt) by fixed point; the term
                // is < 2 ms, so three iterations reach f64 resolution.
                let mut tt = time;
                for _ in 0..3 {
                    tt = time - tdb_minus_tt(tt);
                }
                tt - TT_MINUS_TAI
            }
        }
    }

    /// Value on `system`'s axis for a TAI value.
    pub fn time_from_tai(&self, system: TimeSystem, tai: f64) -> f64 {
        match system {
            TimeSystem::TAI => tai,
            TimeSystem::UTC => {
                let (day, sec) = self.day_sec_from_tai(tai);
                self.utc_from_day_sec(day, sec)
            }
            TimeSystem::TT => tai + TT_MINUS_TAI,
            TimeSystem::TDB => {
                let tt = tai + TT_MINUS_TAI;
                tt + tdb_minus_tt(tt)
            }
        }
    }

    /// Converts `time` from one system's axis to another, pivoting through
    /// TAI.
    pub fn time_from_time(&self, from: TimeSystem, to: TimeSystem, time: f64) -> f64 {
        if from == to {
            return time;
        }
        self.time_from_tai(to, self.tai_from_time(from, time))
    }

    /// `system`-axis value at `sec` into UTC day `day`.
    pub fn time_from_day_sec(&self, system: TimeSystem, day: i64, sec: f64) -> f64 {
        match system {
            TimeSystem::UTC => self.utc_from_day_sec(day, sec),
            _ => self.time_from_tai(system, self.tai_from_day_sec(day, sec)),
        }
    }

    /// Splits a `system`-axis value into `(day, sec)` of the UTC day.
    pub fn day_sec_from_time(&self, system: TimeSystem, time: f64) -> (i64, f64) {
        match system {
            TimeSystem::UTC => self.day_sec_from_utc(time),
            _ => self.day_sec_from_tai(self.tai_from_time(system, time)),
        }
    }

    // -- MJD / JD -----------------------------------------------------------

    /// MJD of the start of `day`.
    pub fn mjd_from_day(&self, day: i64) -> i64 {
        day + MJD_OF_JAN_1_2000
    }

    /// Day number containing integer MJD `mjd`.
    pub fn day_from_mjd(&self, mjd: i64) -> i64 {
        mjd - MJD_OF_JAN_1_2000
    }

    /// Fractional UTC MJD. The fraction is `sec / seconds_on_day(day)`, so a
    /// leap day's 86 401 seconds span exactly one MJD tick.
    pub fn mjd_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        (day + MJD_OF_JAN_1_2000) as f64 + sec / self.seconds_on_day(day)
    }

    /// Splits a fractional UTC MJD into `(day, sec)`.
    pub fn day_sec_from_mjd(&self, mjd: f64) -> (i64, f64) {
        let whole = mjd.floor();
        let day = whole as i64 - MJD_OF_JAN_1_2000;
        (day, (mjd - whole) * self.seconds_on_day(day))
    }

    /// Fractional UTC Julian Date.
    pub fn jd_from_day_sec(&self, day: i64, sec: f64) -> f64 {
        self.mjd_from_day_sec(day, sec) + JD_MINUS_MJD
    }

    /// Splits a fractional UTC Julian Date into `(day, sec)`.
    pub fn day_sec_from_jd(&self, jd: f64) -> (i64, f64) {
        self.day_sec_from_mjd(jd - JD_MINUS_MJD)
    }

    /// MJD on `system`'s own axis. Uniform systems tick 86 400 s per MJD
    /// day; UTC routes through `(day, sec)` so leap days keep their length.
    pub fn mjd_from_time(&self, system: TimeSystem, time: f64) -> f64 {
        match system {
            TimeSystem::UTC => {
                let (day, sec) = self.day_sec_from_utc(time);
                self.mjd_from_day_sec(day, sec)
            }
            _ => MJD_OF_JAN_1_2000 as f64 + time / DAY_SECS,
        }
    }

    /// Inverse of [`mjd_from_time`](Self::mjd_from_time).
    pub fn time_from_mjd(&self, system: TimeSystem, mjd: f64) -> f64 {
        match system {
            TimeSystem::UTC => {
                let (day, sec) = self.day_sec_from_mjd(mjd);
                self.utc_from_day_sec(day, sec)
            }
            _ => (mjd - MJD_OF_JAN_1_2000 as f64) * DAY_SECS,
        }
    }

    /// JD on `system`'s own axis.
    pub fn jd_from_time(&self, system: TimeSystem, time: f64) -> f64 {
        self.mjd_from_time(system, time) + JD_MINUS_MJD
    }

    /// Inverse of [`jd_from_time`](Self::jd_from_time).
    pub fn time_from_jd(&self, system: TimeSystem, jd: f64) -> f64 {
        self.time_from_mjd(system, jd - JD_MINUS_MJD)
    }

    // -- chrono interop -----------------------------------------------------

    /// `(day, sec)` of a chrono UTC timestamp. chrono encodes a leap second
    /// as a nanosecond field past 10⁹ on second 59, which lands here as
    /// `sec ≥ 86400` on the leap day.
    pub fn day_sec_from_datetime(&self, dt: &DateTime<Utc>) -> (i64, f64) {
        let ts = dt.timestamp();
        let day = ts.div_euclid(DAY_SECS as i64) - UNIX_DAYS_TO_2000;
        let sec =
            ts.rem_euclid(DAY_SECS as i64) as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        (day, sec)
    }

    /// chrono UTC timestamp at `sec` into day `day`, rounded to the
    /// nanosecond. Leap seconds map back onto chrono's nanosecond-overflow
    /// encoding. Fails when the instant exceeds chrono's representable
    /// range.
    pub fn datetime_from_day_sec(&self, day: i64, sec: f64) -> Result<DateTime<Utc>> {
        let mut whole = sec.floor() as i64;
        let mut nanos = ((sec - sec.floor()) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            whole += 1;
            nanos = 0;
        }
        if whole >= DAY_SECS as i64 {
            // 23:59:60.x is second 59 with overflowing nanoseconds.
            nanos += ((whole - (DAY_SECS as i64 - 1)) * 1_000_000_000) as u32;
            whole = DAY_SECS as i64 - 1;
        }
        let ts = (day + UNIX_DAYS_TO_2000)
            .checked_mul(DAY_SECS as i64)
            .and_then(|d| d.checked_add(whole))
            .ok_or_else(|| {
                TimeError::OutOfRangeInstant(format!("day {day} second {sec}"))
            })?;
        DateTime::<Utc>::from_timestamp(ts, nanos)
            .ok_or_else(|| TimeError::OutOfRangeInstant(format!("day {day} second {sec}")))
    }
}
