// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 The chronoscale developers

//! Error types shared across the crate.
//!
//! Every fallible operation returns [`TimeError`] to its immediate caller;
//! nothing is clamped or silently defaulted, because a quietly "corrected"
//! calendar date or leap-second offset would corrupt downstream pipelines.
//! Configuration setters are all-or-nothing: on error the previous
//! configuration remains in effect.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimeError>;

/// Errors produced by calendar, leap-second, and time-system operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    /// Month or day-of-month/day-of-year outside the valid range for the
    /// given year and calendar mode, or a date falling in the gap between
    /// the Julian and Gregorian calendars.
    #[error("invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    /// Malformed configuration: a Gregorian-start date that is not a valid
    /// Gregorian date, or a leap-second table violating its ordering rules.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Reverse lookup for a cumulative TAI-UTC offset that is never
    /// tabulated.
    #[error("no tabulated leap-second offset equals {0} s")]
    OffsetNotFound(f64),

    /// A continuous-seconds or day/second value that cannot map to a valid
    /// calendar date, e.g. exceeding the representable integer day range.
    #[error("instant out of representable range: {0}")]
    OutOfRangeInstant(String),
}
