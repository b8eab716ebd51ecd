// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! The TAI−UTC offset table.
//!
//! Each [`LeapSecondEntry`] gives the cumulative TAI−UTC offset **on and
//! after** its day number; an entry's `day` is the day *containing* the
//! inserted second, so `offset_on_day(day)` already includes it. Entries from
//! 1972 on are whole-second steps (`rate == None`). Entries for 1961–1971
//! carry the USNO drift rate in seconds per day and describe the
//! "rubber-second" era, where the offset grows linearly until the next entry
//! takes over:
//!
//! ```text
//! Ω(day) = entry.offset + (day − entry.day) · rate
//! ```
//!
//! The bundled table covers 1961-01-01 through the leap second of
//! 2016-12-31. Days before the first entry and after the last are outside
//! the table; policy for those eras lives in [`crate::ut_model`].
//!
//! Day numbers throughout count from 2000-01-01 (day 0).

use crate::errors::{Result, TimeError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of the TAI−UTC table.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondEntry {
    /// First day (from 2000-01-01) on which this entry governs.
    pub day: i64,
    /// Cumulative TAI−UTC in seconds on `day`.
    pub offset: f64,
    /// Drift rate in seconds per day for rubber-second entries;
    /// `None` for whole-second steps.
    pub rate: Option<f64>,
}

impl LeapSecondEntry {
    /// Step entry: whole-second offset, constant until the next entry.
    pub const fn step(day: i64, offset: f64) -> Self {
        Self { day, offset, rate: None }
    }

    /// Rubber-second entry: offset grows by `rate` seconds per day.
    pub const fn rubber(day: i64, offset: f64, rate: f64) -> Self {
        Self { day, offset, rate: Some(rate) }
    }

    /// TAI−UTC on `day`, assuming this entry governs it.
    #[inline]
    fn offset_on(&self, day: i64) -> f64 {
        match self.rate {
            Some(rate) => self.offset + (day - self.day) as f64 * rate,
            None => self.offset,
        }
    }
}

/// Bundled offsets, 1961–1971: USNO rubber-second segments with the offset
/// re-anchored to the segment's first day, then the rate in s/day.
const RUBBER_ENTRIES: [LeapSecondEntry; 13] = [
    LeapSecondEntry::rubber(-14_244, 1.422_818_0, 0.001_296), // 1961-01-01
    LeapSecondEntry::rubber(-14_032, 1.647_570_0, 0.001_296), // 1961-08-01
    LeapSecondEntry::rubber(-13_879, 1.845_858_0, 0.001_123_2), // 1962-01-01
    LeapSecondEntry::rubber(-13_210, 2.697_278_8, 0.001_123_2), // 1963-11-01
    LeapSecondEntry::rubber(-13_149, 2.765_794_0, 0.001_296), // 1964-01-01
    LeapSecondEntry::rubber(-13_058, 2.983_730_0, 0.001_296), // 1964-04-01
    LeapSecondEntry::rubber(-12_905, 3.282_018_0, 0.001_296), // 1964-09-01
    LeapSecondEntry::rubber(-12_783, 3.540_130_0, 0.001_296), // 1965-01-01
    LeapSecondEntry::rubber(-12_724, 3.716_594_0, 0.001_296), // 1965-03-01
    LeapSecondEntry::rubber(-12_602, 3.974_706_0, 0.001_296), // 1965-07-01
    LeapSecondEntry::rubber(-12_540, 4.155_058_0, 0.001_296), // 1965-09-01
    LeapSecondEntry::rubber(-12_418, 4.313_170_0, 0.002_592), // 1966-01-01
    LeapSecondEntry::rubber(-11_657, 6.185_682_0, 0.002_592), // 1968-02-01
];

/// Bundled offsets, 1972–2017: IERS whole-second steps. Each entry's day is
/// the day containing the inserted second (one before the IERS date on which
/// the new offset takes effect).
const STEP_ENTRIES: [LeapSecondEntry; 28] = [
    LeapSecondEntry::step(-10_228, 10.0), // 1971-12-31
    LeapSecondEntry::step(-10_046, 11.0), // 1972-06-30
    LeapSecondEntry::step(-9_862, 12.0),  // 1972-12-31
    LeapSecondEntry::step(-9_497, 13.0),  // 1973-12-31
    LeapSecondEntry::step(-9_132, 14.0),  // 1974-12-31
    LeapSecondEntry::step(-8_767, 15.0),  // 1975-12-31
    LeapSecondEntry::step(-8_401, 16.0),  // 1976-12-31
    LeapSecondEntry::step(-8_036, 17.0),  // 1977-12-31
    LeapSecondEntry::step(-7_671, 18.0),  // 1978-12-31
    LeapSecondEntry::step(-7_306, 19.0),  // 1979-12-31
    LeapSecondEntry::step(-6_759, 20.0),  // 1981-06-30
    LeapSecondEntry::step(-6_394, 21.0),  // 1982-06-30
    LeapSecondEntry::step(-6_029, 22.0),  // 1983-06-30
    LeapSecondEntry::step(-5_298, 23.0),  // 1985-06-30
    LeapSecondEntry::step(-4_384, 24.0),  // 1987-12-31
    LeapSecondEntry::step(-3_653, 25.0),  // 1989-12-31
    LeapSecondEntry::step(-3_288, 26.0),  // 1990-12-31
    LeapSecondEntry::step(-2_741, 27.0),  // 1992-06-30
    LeapSecondEntry::step(-2_376, 28.0),  // 1993-06-30
    LeapSecondEntry::step(-2_011, 29.0),  // 1994-06-30
    LeapSecondEntry::step(-1_462, 30.0),  // 1995-12-31
    LeapSecondEntry::step(-915, 31.0),    // 1997-06-30
    LeapSecondEntry::step(-366, 32.0),    // 1998-12-31
    LeapSecondEntry::step(2_191, 33.0),   // 2005-12-31
    LeapSecondEntry::step(3_287, 34.0),   // 2008-12-31
    LeapSecondEntry::step(4_564, 35.0),   // 2012-06-30
    LeapSecondEntry::step(5_659, 36.0),   // 2015-06-30
    LeapSecondEntry::step(6_209, 37.0),   // 2016-12-31
];

/// Mutable, ordered TAI−UTC table.
///
/// Entries are kept strictly increasing by day; all lookups binary-search
/// for the governing entry (the latest entry at or before the queried day).
///
/// Serialized as a plain entry sequence; deserialization runs the same
/// validation as [`load`](Self::load), so a snapshot cannot smuggle in a
/// table the setters would reject.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<LeapSecondEntry>", into = "Vec<LeapSecondEntry>")
)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl TryFrom<Vec<LeapSecondEntry>> for LeapSecondTable {
    type Error = TimeError;

    fn try_from(entries: Vec<LeapSecondEntry>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<LeapSecondTable> for Vec<LeapSecondEntry> {
    fn from(table: LeapSecondTable) -> Self {
        table.entries
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::bundled()
    }
}

impl LeapSecondTable {
    /// The table shipped with the crate: USNO rubber-second segments for
    /// 1961–1971 followed by every IERS leap second through 2016-12-31.
    pub fn bundled() -> Self {
        let mut entries = Vec::with_capacity(RUBBER_ENTRIES.len() + STEP_ENTRIES.len());
        entries.extend_from_slice(&RUBBER_ENTRIES);
        entries.extend_from_slice(&STEP_ENTRIES);
        Self { entries }
    }

    /// Builds a table from caller-supplied entries.
    ///
    /// Entries must be non-empty, strictly increasing by day, and carry
    /// finite offsets and rates; otherwise [`TimeError::InvalidConfiguration`]
    /// is returned and nothing is built.
    pub fn from_entries(entries: Vec<LeapSecondEntry>) -> Result<Self> {
        Self::validate(&entries)?;
        Ok(Self { entries })
    }

    /// Replaces the whole table. On error the previous table is kept.
    pub fn load(&mut self, entries: Vec<LeapSecondEntry>) -> Result<()> {
        Self::validate(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn validate(entries: &[LeapSecondEntry]) -> Result<()> {
        if entries.is_empty() {
            return Err(TimeError::InvalidConfiguration(
                "leap-second table must contain at least one entry".into(),
            ));
        }
        for pair in entries.windows(2) {
            if pair[1].day <= pair[0].day {
                return Err(TimeError::InvalidConfiguration(format!(
                    "leap-second entries out of order: day {} follows day {}",
                    pair[1].day, pair[0].day
                )));
            }
        }
        for e in entries {
            if !e.offset.is_finite() || e.rate.is_some_and(|r| !r.is_finite()) {
                return Err(TimeError::InvalidConfiguration(format!(
                    "non-finite leap-second entry on day {}",
                    e.day
                )));
            }
        }
        Ok(())
    }

    /// Registers a leap second of `delta` whole seconds contained in `day`.
    ///
    /// The entry's cumulative offset is the offset in effect on `day − 1`
    /// plus `delta`. An existing entry on the same day is replaced. Fails if
    /// `day` precedes the table (there is no offset to extend).
    pub fn insert(&mut self, day: i64, delta: i64) -> Result<()> {
        let base = self.offset_on_day(day - 1).ok_or_else(|| {
            TimeError::InvalidConfiguration(format!(
                "cannot insert a leap second on day {day}, before the table begins"
            ))
        })?;
        let entry = LeapSecondEntry::step(day, base + delta as f64);
        match self.entries.binary_search_by_key(&day, |e| e.day) {
            Ok(i) => self.entries[i] = entry,
            Err(i) => self.entries.insert(i, entry),
        }
        Ok(())
    }

    /// The governing entry for `day`: the latest entry at or before it.
    /// `None` when `day` precedes the table.
    pub fn governing_entry(&self, day: i64) -> Option<&LeapSecondEntry> {
        let idx = self.entries.partition_point(|e| e.day <= day);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }

    /// Cumulative TAI−UTC on `day`, or `None` before the table begins.
    ///
    /// Days past the last entry extend it: a step entry stays flat, a rubber
    /// entry keeps drifting at its rate.
    pub fn offset_on_day(&self, day: i64) -> Option<f64> {
        self.governing_entry(day).map(|e| e.offset_on(day))
    }

    /// First day covered by the table.
    pub fn first_day(&self) -> i64 {
        self.entries[0].day
    }

    /// Last entry day. Offsets beyond it are extrapolation, not data.
    pub fn last_day(&self) -> i64 {
        self.entries[self.entries.len() - 1].day
    }

    /// First day governed by a whole-second step entry, if any.
    pub fn step_era_start(&self) -> Option<i64> {
        self.entries.iter().find(|e| e.rate.is_none()).map(|e| e.day)
    }

    /// Drift rate of the entry preceding the table start, in s/day.
    /// Zero when the earliest entry is a step.
    pub fn leading_rate(&self) -> f64 {
        self.entries[0].rate.unwrap_or(0.0)
    }

    /// Offset anchored at the table start, for backward rate extension.
    pub fn first_offset(&self) -> f64 {
        self.entries[0].offset
    }

    /// The entries, ordered by day.
    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    /// The day on which the cumulative offset equals `offset`, searching
    /// from the most recent entry backward so that repeated offsets resolve
    /// to the latest matching day.
    ///
    /// For step entries the match is exact on the tabulated value. Within a
    /// rubber segment the offset must land on a whole day of the segment to
    /// within 1 ns. Anything else is [`TimeError::OffsetNotFound`].
    pub fn day_from_offset(&self, offset: f64) -> Result<i64> {
        const TOLERANCE: f64 = 1e-9;
        for (i, entry) in self.entries.iter().enumerate().rev() {
            match entry.rate {
                None => {
                    if entry.offset == offset {
                        return Ok(entry.day);
                    }
                }
                Some(rate) => {
                    // Segment runs from entry.day up to the next entry.
                    let k = (offset - entry.offset) / rate;
                    let day = entry.day + k.round() as i64;
                    let segment_end = self
                        .entries
                        .get(i + 1)
                        .map(|next| next.day - 1)
                        .unwrap_or(i64::MAX);
                    if day >= entry.day
                        && day <= segment_end
                        && (entry.offset_on(day) - offset).abs() <= TOLERANCE
                    {
                        return Ok(day);
                    }
                }
            }
        }
        Err(TimeError::OffsetNotFound(offset))
    }
}
