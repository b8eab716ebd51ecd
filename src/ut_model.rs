// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Policy for the TAI−UTC offset outside the tabulated era.
//!
//! Inside the table the offset is data. Before the first entry and after the
//! last it is a modelling choice, selected per era by [`UtModel`]:
//!
//! * pre-table — either the ΔT polynomials (treating UT1 and UTC as one
//!   scale, the only meaningful reading before 1961), or a backward
//!   extension of the earliest rubber segment's drift rate;
//! * post-table — either flat extrapolation of the last tabulated offset
//!   (the IERS convention until a new leap second is announced), or the ΔT
//!   polynomials for far-future estimates.
//!
//! The ΔT arms convert through `TAI − UT = ΔT − (TT − TAI)`.

use crate::convert::TT_MINUS_TAI;
use crate::delta_t::delta_t_on_day;
use crate::leapsecs::LeapSecondTable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offset policy for days before the table begins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PreTableModel {
    /// `Ω = ΔT − 32.184`, from the polynomial model.
    #[default]
    DeltaT,
    /// Extend the earliest table segment's drift rate backward.
    TableRate,
}

/// Offset policy for days after the last table entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PostTableModel {
    /// Hold the last tabulated offset (step entries stay flat, a trailing
    /// rubber entry keeps drifting at its rate).
    #[default]
    Extrapolate,
    /// `Ω = ΔT − 32.184`, from the polynomial model.
    DeltaT,
}

/// Era policies bundled for a [`crate::TimeContext`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtModel {
    pub pre_table: PreTableModel,
    pub post_table: PostTableModel,
}

impl UtModel {
    pub const fn new(pre_table: PreTableModel, post_table: PostTableModel) -> Self {
        Self { pre_table, post_table }
    }

    /// Cumulative TAI−UTC in seconds on `day`, total over all eras.
    pub fn tai_minus_utc(&self, table: &LeapSecondTable, day: i64) -> f64 {
        match table.offset_on_day(day) {
            Some(tabulated) => {
                if day > table.last_day() && self.post_table == PostTableModel::DeltaT {
                    delta_t_offset(day)
                } else {
                    tabulated
                }
            }
            None => match self.pre_table {
                PreTableModel::DeltaT => delta_t_offset(day),
                PreTableModel::TableRate => {
                    table.first_offset() + (day - table.first_day()) as f64 * table.leading_rate()
                }
            },
        }
    }

    /// Length of UTC day `day` in SI seconds:
    /// `86400 + Ω(day) − Ω(day − 1)`.
    ///
    /// Whole-second step days come out exactly 86401 (or 86399); rubber and
    /// ΔT days differ from 86400 by the day's drift.
    pub fn seconds_on_day(&self, table: &LeapSecondTable, day: i64) -> f64 {
        86_400.0 + self.tai_minus_utc(table, day) - self.tai_minus_utc(table, day - 1)
    }

    /// Number of whole leap seconds contained in `day` (0 on ordinary days,
    /// ±n on step days).
    pub fn leapsecs_on_day(&self, table: &LeapSecondTable, day: i64) -> i64 {
        (self.seconds_on_day(table, day) - 86_400.0).round() as i64
    }
}

#[inline]
fn delta_t_offset(day: i64) -> f64 {
    delta_t_on_day(day).value() - TT_MINUS_TAI
}
