// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Calendar arithmetic: integer day numbers vs. (year, month, day) and
//! (year, day-of-year) tuples.
//!
//! Every date is represented by an integer day number, where day 0 is
//! January 1, 2000 (Gregorian). Years before 1 CE use the astronomical
//! convention: 1 BCE is year 0, 2 BCE is year -1, and so on, with no
//! discontinuity.
//!
//! A [`Calendar`] carries the one piece of configuration these conversions
//! need: the first day of the Gregorian calendar. Dates on or after it use
//! Gregorian leap-year rules (divisible by 4, not by 100 unless by 400);
//! earlier dates use the Julian rule (every 4th year), extended indefinitely
//! backward so that years 0, -4, -8, ... are leap years. Passing
//! `proleptic = true` applies Gregorian rules unconditionally.
//!
//! The day-number algorithm anchors months to March so that the leap day
//! falls at the end of the counting year, following
//! <http://alcor.concordia.ca/~gpkatch/gdate-algorithm.html>.

use crate::errors::{Result, TimeError};

/// Day number of February 29, 1 BCE (year 0) in the proleptic Gregorian
/// calendar, relative to day 0 = January 1, 2000.
const FEB29_1BCE_GREGORIAN: i128 = -730_426;

/// Day number of February 29, 1 BCE in the backward-extended Julian calendar.
const FEB29_1BCE_JULIAN: i128 = -730_428;

/// Gregorian-start configuration for calendar conversions.
///
/// The default transition is October 15, 1582, the first day the Gregorian
/// calendar was in effect in much of Europe. Use
/// [`set_gregorian_start`](Calendar::set_gregorian_start) for other adoption
/// dates (e.g. September 14, 1752 for Britain), or
/// [`suppress_julian`](Calendar::suppress_julian) to apply Gregorian rules to
/// all dates even when `proleptic` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calendar {
    /// Day number of the first Gregorian day; `None` suppresses the Julian
    /// calendar entirely.
    gregorian_day1: Option<i64>,
    /// The configured transition date as (year, month, day), when not
    /// suppressed.
    gregorian_start_ymd: Option<(i64, u32, u32)>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            // day_from_ymd(1582, 10, 15, proleptic=true)
            gregorian_day1: Some(-152_384),
            gregorian_start_ymd: Some((1582, 10, 15)),
        }
    }
}

impl Calendar {
    /// Day number for a year, month (1-12), and day of month.
    ///
    /// Fails with [`TimeError::InvalidCalendarDate`] if the month is outside
    /// 1-12, the day is outside the month's valid range for this year and
    /// calendar mode, or the date falls in the gap skipped by the
    /// Julian-to-Gregorian transition. No silent clamping.
    pub fn day_from_ymd(&self, y: i64, m: u32, d: u32, proleptic: bool) -> Result<i64> {
        if !(1..=12).contains(&m) {
            return Err(TimeError::InvalidCalendarDate(format!(
                "month {m} is outside 1-12"
            )));
        }
        if !(1..=31).contains(&d) {
            return Err(TimeError::InvalidCalendarDate(format!(
                "day {d} is outside 1-31"
            )));
        }

        let raw = self.raw_day_from_ymd(y as i128, m as i128, d as i128, proleptic);
        let day = i64::try_from(raw).map_err(|_| {
            TimeError::OutOfRangeInstant(format!("{y:+}-{m:02}-{d:02} exceeds the day range"))
        })?;

        // A single round-trip check rejects day numbers past the month's end,
        // February 29 of non-leap years, and dates inside the transition gap,
        // without ever rejecting a representable date.
        if self.ymd_from_day(day, proleptic) != (y, m, d) {
            return Err(TimeError::InvalidCalendarDate(format!(
                "{y:+}-{m:02}-{d:02} (proleptic: {proleptic})"
            )));
        }
        Ok(day)
    }

    /// Year, month, and day of month for a day number. Total: every `i64`
    /// day maps to a date.
    pub fn ymd_from_day(&self, day: i64, proleptic: bool) -> (i64, u32, u32) {
        let day = day as i128;

        // Proleptic Gregorian: year anchored on March 1 so the leap day is
        // the final day of the counting year.
        let g = day + 730_425;
        let mut y = (10_000 * g + 14_780).div_euclid(3_652_425);
        let mut doy = g - gregorian_elapsed(y);
        if doy < 0 {
            y -= 1;
            doy = g - gregorian_elapsed(y);
        }

        if !proleptic {
            if let Some(day1) = self.gregorian_day1 {
                if day < day1 as i128 {
                    let g = day + 730_427;
                    y = (100 * g + 75).div_euclid(36_525);
                    doy = g - (365 * y + y.div_euclid(4));
                }
            }
        }

        // doy is 0-365 counted from March 1; m0 == 0 for March.
        let m0 = (100 * doy + 52).div_euclid(3060);
        let m = (m0 + 2) % 12 + 1;
        let y = y + (m0 + 2).div_euclid(12);
        let d = doy - (m0 * 306 + 5).div_euclid(10) + 1;

        (y as i64, m as u32, d as u32)
    }

    /// Day number for a year and day-of-year (1-366).
    ///
    /// Fails with [`TimeError::InvalidCalendarDate`] when the day-of-year
    /// exceeds the number of days in that year.
    pub fn day_from_yd(&self, y: i64, doy: u32, proleptic: bool) -> Result<i64> {
        if doy < 1 || doy > self.days_in_year(y, proleptic) {
            return Err(TimeError::InvalidCalendarDate(format!(
                "day-of-year {doy} is invalid for year {y:+}"
            )));
        }
        let raw = self.raw_day_from_ymd(y as i128, 1, 1, proleptic) + doy as i128 - 1;
        i64::try_from(raw).map_err(|_| {
            TimeError::OutOfRangeInstant(format!("{y:+} day {doy} exceeds the day range"))
        })
    }

    /// Year and day-of-year for a day number.
    pub fn yd_from_day(&self, day: i64, proleptic: bool) -> (i64, u32) {
        let (y, _, _) = self.ymd_from_day(day, proleptic);
        let jan1 = self.raw_day_from_ymd(y as i128, 1, 1, proleptic);
        (y, (day as i128 - jan1 + 1) as u32)
    }

    /// Number of days in a month. Never fails: any integer year is accepted
    /// and months outside 1-12 wrap into adjacent years.
    pub fn days_in_month(&self, y: i64, m: u32, proleptic: bool) -> u32 {
        let month = 12 * (y as i128 - 2000) + m as i128 - 1;
        let day0 = self.first_of_month(month, proleptic);
        let day1 = self.first_of_month(month + 1, proleptic);
        (day1 - day0) as u32
    }

    /// Number of days in a year. Never fails.
    pub fn days_in_year(&self, y: i64, proleptic: bool) -> u32 {
        let day0 = self.raw_day_from_ymd(y as i128, 1, 1, proleptic);
        let day1 = self.raw_day_from_ymd(y as i128 + 1, 1, 1, proleptic);
        (day1 - day0) as u32
    }

    /// Elapsed months since January 2000 for a year and month number.
    pub fn month_from_ym(&self, y: i64, m: u32) -> i64 {
        12 * (y - 2000) + m as i64 - 1
    }

    /// Year and month number (1-12) for a count of elapsed months since
    /// January 2000.
    pub fn ym_from_month(&self, month: i64) -> (i64, u32) {
        (2000 + month.div_euclid(12), month.rem_euclid(12) as u32 + 1)
    }

    /// Set the first day of the Gregorian calendar.
    ///
    /// The supplied date must itself be a valid Gregorian date, otherwise
    /// this fails with [`TimeError::InvalidConfiguration`] and the previous
    /// setting stays in effect.
    pub fn set_gregorian_start(&mut self, y: i64, m: u32, d: u32) -> Result<()> {
        let day = self.day_from_ymd(y, m, d, true).map_err(|_| {
            TimeError::InvalidConfiguration(format!(
                "{y:+}-{m:02}-{d:02} is not a valid Gregorian date"
            ))
        })?;
        self.gregorian_day1 = Some(day);
        self.gregorian_start_ymd = Some((y, m, d));
        Ok(())
    }

    /// Suppress the Julian calendar entirely: Gregorian rules apply to all
    /// dates, even when `proleptic` is false.
    pub fn suppress_julian(&mut self) {
        self.gregorian_day1 = None;
        self.gregorian_start_ymd = None;
    }

    /// The configured Gregorian transition date, or `None` when the Julian
    /// calendar is suppressed.
    pub fn gregorian_start(&self) -> Option<(i64, u32, u32)> {
        self.gregorian_start_ymd
    }

    /// Day number without validation, in wide arithmetic. `m` must already
    /// be in 1-12.
    fn raw_day_from_ymd(&self, y: i128, m: i128, d: i128, proleptic: bool) -> i128 {
        // mm makes March month 0 and February month 11; yy drops by one for
        // January and February so the leap day ends the counting year.
        let mm = (m + 9) % 12;
        let yy = y - mm / 10;
        let month_days = (mm * 306 + 5) / 10;

        let day = gregorian_elapsed(yy) + month_days + d + FEB29_1BCE_GREGORIAN;
        if proleptic {
            return day;
        }
        match self.gregorian_day1 {
            Some(day1) if day < day1 as i128 => {
                365 * yy + yy.div_euclid(4) + month_days + d + FEB29_1BCE_JULIAN
            }
            _ => day,
        }
    }

    /// Day number of the first day of an elapsed-month count since
    /// January 2000.
    fn first_of_month(&self, month: i128, proleptic: bool) -> i128 {
        let y = 2000 + month.div_euclid(12);
        let m = month.rem_euclid(12) + 1;
        self.raw_day_from_ymd(y, m, 1, proleptic)
    }
}

/// Elapsed days from the end of February, 1 BCE to the end of February of
/// year `yy`, under Gregorian leap-year rules.
#[inline]
fn gregorian_elapsed(yy: i128) -> i128 {
    365 * yy + yy.div_euclid(4) - yy.div_euclid(100) + yy.div_euclid(400)
}
