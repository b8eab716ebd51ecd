// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Time-scale and calendar conversions for astronomical pipelines.
//!
//! The crate converts between UTC, TAI, TT, and TDB, between day numbers and
//! calendar dates, and between all of those and Julian / Modified Julian
//! Dates, with leap seconds handled as data rather than folklore. Everything
//! runs through an explicit [`TimeContext`]; there is no global state.
//!
//! # Core types
//!
//! - [`TimeContext`] — calendar + leap-second table + era policy; every
//!   conversion is a method on it.
//! - [`TimeSystem`] — the closed set of supported systems (TAI, UTC, TT, TDB).
//! - [`Calendar`] — Gregorian/Julian day-number arithmetic with a movable
//!   transition date.
//! - [`LeapSecondTable`] / [`LeapSecondEntry`] — the mutable TAI−UTC table,
//!   covering the rubber-second era (1961–1971) and whole-second steps.
//! - [`UtModel`] — policy for days before and after the table
//!   ([`PreTableModel`], [`PostTableModel`]).
//! - [`TimeError`] — what fallible operations return.
//!
//! # Axes
//!
//! | Form | Meaning |
//! |------|---------|
//! | `day: i64` | calendar day, day 0 = 2000-01-01 |
//! | `(day, sec)` | seconds into the UTC day; lossless across leap seconds |
//! | `time: f64` | seconds on one system's axis from its 2000-01-01T00:00:00 |
//! | MJD / JD | fractional day counts, `JD = MJD + 2 400 000.5` |
//!
//! # Eras
//!
//! The TAI−UTC offset is tabulated from 1961 (drifting "rubber-second"
//! segments, then whole-second steps from 1972). Before the table the crate
//! falls back to the **ΔT** polynomial model ([`delta_t_for_year`]); after
//! it, to flat extrapolation. Both fallbacks are configurable per context
//! via [`UtModel`].
//!
//! # Quick start
//!
//! ```
//! use chronoscale::{TimeContext, TimeSystem};
//!
//! let ctx = TimeContext::default();
//! let day = ctx.calendar().day_from_ymd(2016, 12, 31, false)?;
//! assert_eq!(ctx.seconds_on_day(day), 86_401.0);
//!
//! // Second 86400 of a leap day is a real instant on the TAI axis.
//! let tai = ctx.tai_from_day_sec(day, 86_400.5);
//! let tt = ctx.time_from_tai(TimeSystem::TT, tai);
//! assert!((tt - tai - 32.184).abs() < 1e-6);
//! # Ok::<(), chronoscale::TimeError>(())
//! ```

pub mod batch;
pub mod calendar;
pub mod convert;
pub mod delta_t;
pub mod errors;
pub mod leapsecs;
pub mod ut_model;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use batch::{map, map_masked, try_map, Masked};
pub use calendar::Calendar;
pub use convert::{
    hms_from_sec, sec_from_hms, tdb_minus_tt, TimeContext, TimeSystem, JD_MINUS_MJD,
    MJD_OF_JAN_1_2000, TT_MINUS_TAI,
};
pub use delta_t::{day_from_delta_t, delta_t_for_year, delta_t_on_day};
pub use errors::{Result, TimeError};
pub use leapsecs::{LeapSecondEntry, LeapSecondTable};
pub use ut_model::{PostTableModel, PreTableModel, UtModel};
