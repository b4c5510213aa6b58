//! Date conventions used throughout the engine.
//!
//! All accrual and maturity computations use an ACT/365 fixed day count.
//! The valuation date is always an explicit parameter; there is no global
//! "today" anywhere in the engine, which keeps historical and what-if
//! valuations thread-safe.

use chrono::NaiveDate;

/// Days per year under the ACT/365 fixed convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Year fraction between two dates under ACT/365 fixed.
///
/// Returns 0.0 when `end` is on or before `start`; the engine never
/// works with negative accrual periods.
#[must_use]
pub fn year_fraction(start: NaiveDate, end: NaiveDate) -> f64 {
    let days = (end - start).num_days();
    (days as f64 / DAYS_PER_YEAR).max(0.0)
}

/// Calendar days from `valuation_date` to `maturity_date`.
///
/// Negative when the deal has already matured.
#[must_use]
pub fn days_to_maturity(maturity_date: NaiveDate, valuation_date: NaiveDate) -> i64 {
    (maturity_date - valuation_date).num_days()
}
