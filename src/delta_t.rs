// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! ΔT model: the long-term difference between uniform atomic time and
//! Earth-rotation time.
//!
//! Outside the tabulated leap-second era, the TAI-UTC offset is derived from
//! **ΔT = TT − UT1**, evaluated with the piecewise polynomial fit published
//! for the *Five Millennium Canon of Solar Eclipses: -1999 to +3000*
//! (Espenak & Meeus), <https://eclipse.gsfc.nasa.gov/SEcat5/deltatpoly.html>.
//! The segments are keyed by decimal year and join to within the model's
//! stated uncertainty; the fit extends indefinitely into the past and future
//! through the long-term parabola in `(year − 1820)`.
//!
//! The forward direction is exact polynomial evaluation. The reverse
//! direction (finding the day on which ΔT reaches a given value) is only
//! needed by parsers, so [`day_from_delta_t`] settles for bisection over a
//! caller-supplied bracket.

use crate::errors::{Result, TimeError};
use qtty::Seconds;

/// Mean length of the Gregorian year in days, used to map day numbers onto
/// the model's decimal-year axis.
const DAYS_PER_YEAR: f64 = 365.2425;

/// **Before -500 and after 2150**: the long-term parabola.
#[inline]
fn delta_t_parabola(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// **-500 to 500**
#[inline]
fn delta_t_classical(y: f64) -> f64 {
    let u = y / 100.0;
    10583.6
        + u * (-1014.41
            + u * (33.78311
                + u * (-5.952053 + u * (-0.1798452 + u * (0.022174192 + u * 0.0090316521)))))
}

/// **500 to 1600**
#[inline]
fn delta_t_medieval(y: f64) -> f64 {
    let u = (y - 1000.0) / 100.0;
    1574.2
        + u * (-556.01
            + u * (71.23472
                + u * (0.319781 + u * (-0.8503463 + u * (-0.005050998 + u * 0.0083572073)))))
}

/// **1600 to 1700**
#[inline]
fn delta_t_1600(y: f64) -> f64 {
    let t = y - 1600.0;
    120.0 + t * (-0.9808 + t * (-0.01532 + t / 7129.0))
}

/// **1700 to 1800**
#[inline]
fn delta_t_1700(y: f64) -> f64 {
    let t = y - 1700.0;
    8.83 + t * (0.1603 + t * (-0.0059285 + t * (0.00013336 - t / 1_174_000.0)))
}

/// **1800 to 1860**
#[inline]
fn delta_t_1800(y: f64) -> f64 {
    let t = y - 1800.0;
    13.72
        + t * (-0.332447
            + t * (0.0068612
                + t * (0.0041116
                    + t * (-0.00037436
                        + t * (0.0000121272 + t * (-0.0000001699 + t * 0.000000000875))))))
}

/// **1860 to 1900**
#[inline]
fn delta_t_1860(y: f64) -> f64 {
    let t = y - 1860.0;
    7.62 + t * (0.5737 + t * (-0.251754 + t * (0.01680668 + t * (-0.0004473624 + t / 233_174.0))))
}

/// **1900 to 1920**
#[inline]
fn delta_t_1900(y: f64) -> f64 {
    let t = y - 1900.0;
    -2.79 + t * (1.494119 + t * (-0.0598939 + t * (0.0061966 - t * 0.000197)))
}

/// **1920 to 1941**
#[inline]
fn delta_t_1920(y: f64) -> f64 {
    let t = y - 1920.0;
    21.20 + t * (0.84493 + t * (-0.076100 + t * 0.0020936))
}

/// **1941 to 1961**
#[inline]
fn delta_t_1941(y: f64) -> f64 {
    let t = y - 1950.0;
    29.07 + t * (0.407 + t * (-1.0 / 233.0 + t / 2547.0))
}

/// **1961 to 1986**
#[inline]
fn delta_t_1961(y: f64) -> f64 {
    let t = y - 1975.0;
    45.45 + t * (1.067 + t * (-1.0 / 260.0 - t / 718.0))
}

/// **1986 to 2005**
#[inline]
fn delta_t_1986(y: f64) -> f64 {
    let t = y - 2000.0;
    63.86
        + t * (0.3345 + t * (-0.060374 + t * (0.0017275 + t * (0.000651814 + t * 0.00002373599))))
}

/// **2005 to 2050**
#[inline]
fn delta_t_2005(y: f64) -> f64 {
    let t = y - 2000.0;
    62.92 + t * (0.32217 + t * 0.005589)
}

/// **2050 to 2150**: the long-term parabola blended back in.
#[inline]
fn delta_t_2050(y: f64) -> f64 {
    delta_t_parabola(y) - 0.5628 * (2150.0 - y)
}

/// ΔT in seconds for a decimal year on the UT axis.
pub fn delta_t_for_year(year: f64) -> Seconds {
    let dt = match year {
        y if y < -500.0 => delta_t_parabola(y),
        y if y < 500.0 => delta_t_classical(y),
        y if y < 1600.0 => delta_t_medieval(y),
        y if y < 1700.0 => delta_t_1600(y),
        y if y < 1800.0 => delta_t_1700(y),
        y if y < 1860.0 => delta_t_1800(y),
        y if y < 1900.0 => delta_t_1860(y),
        y if y < 1920.0 => delta_t_1900(y),
        y if y < 1941.0 => delta_t_1920(y),
        y if y < 1961.0 => delta_t_1941(y),
        y if y < 1986.0 => delta_t_1961(y),
        y if y < 2005.0 => delta_t_1986(y),
        y if y < 2050.0 => delta_t_2005(y),
        y if y < 2150.0 => delta_t_2050(y),
        y => delta_t_parabola(y),
    };
    Seconds::new(dt)
}

/// ΔT in seconds for a day number (day 0 = 2000-01-01).
#[inline]
pub fn delta_t_on_day(day: i64) -> Seconds {
    delta_t_for_year(2000.0 + day as f64 / DAYS_PER_YEAR)
}

/// Earliest day in `[lo, hi]` on which ΔT crosses `target`, by bisection.
///
/// The model is only piecewise monotonic, so the caller supplies a bracket
/// within which ΔT crosses the target once. Fails with
/// [`TimeError::OffsetNotFound`] when the bracket does not straddle the
/// target value.
pub fn day_from_delta_t(target: Seconds, lo: i64, hi: i64) -> Result<i64> {
    let f = |day: i64| (delta_t_on_day(day) - target).value();
    let (mut lo, mut hi) = (lo, hi);
    let flo = f(lo);
    if flo == 0.0 {
        return Ok(lo);
    }
    if flo * f(hi) > 0.0 {
        return Err(TimeError::OffsetNotFound(target.value()));
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if f(mid) * flo > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(hi)
}
