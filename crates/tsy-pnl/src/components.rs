//! The four PnL component formulas.
//!
//! Shared conventions:
//! - Expiry rule: `maturity_date <= valuation_date` zeroes every component.
//! - Sign: `+1` for loan-side, `-1` for deposit-side
//!   ([`tsy_core::Direction::sign`]).
//! - Day count: ACT/365 fixed ([`tsy_core::dates::year_fraction`]).
//!
//! Each formula guards its output: a non-finite result degrades to 0.0
//! with a warning rather than poisoning the batch.

use crate::constants::{
    DURATION_PROXY_FACTOR, LIQUIDITY_SIZE_SCALE, LIQUIDITY_SPREAD_CAP, RATE_SENSITIVITY,
};
use chrono::NaiveDate;
use log::warn;
use tsy_core::dates::year_fraction;
use tsy_core::Deal;

/// Guards a component result against non-finite values.
fn finite_or_zero(deal_id: &str, component: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!("Non-finite {component} PnL for deal {deal_id}, degrading to 0");
        0.0
    }
}

/// Accrued PnL: carry earned on the client/OIS rate differential over
/// the elapsed holding period.
///
/// Zero when the deal has not started (`value_date > valuation_date`),
/// has expired, or the accrual period is non-positive.
///
/// ```text
/// accrued = sign * (client_rate - ois_equivalent_rate) * amount * years_elapsed
/// ```
#[must_use]
pub fn accrued_pnl(deal: &Deal, valuation_date: NaiveDate) -> f64 {
    if deal.is_expired(valuation_date) || deal.value_date > valuation_date {
        return 0.0;
    }

    let years_accrued = year_fraction(deal.value_date, valuation_date);
    if years_accrued <= 0.0 {
        return 0.0;
    }

    let rate_diff = deal.client_rate - deal.ois_equivalent_rate;
    let pnl = deal.direction.sign() * rate_diff * deal.amount * years_accrued;
    finite_or_zero(&deal.deal_id, "accrued", pnl)
}

/// Mark-to-market PnL: valuation change from the curve move since
/// inception, using a fixed duration proxy.
///
/// ```text
/// duration = time_to_maturity * DURATION_PROXY_FACTOR
/// mtm      = -sign * (ois_now - ois_equivalent_rate) * amount * duration
/// ```
///
/// The sign flips because rising rates devalue a loan-side position.
#[must_use]
pub fn mtm_pnl(deal: &Deal, ois_rate_now: f64, valuation_date: NaiveDate) -> f64 {
    if deal.is_expired(valuation_date) {
        return 0.0;
    }

    let time_to_maturity = year_fraction(valuation_date, deal.maturity_date);
    if time_to_maturity <= 0.0 {
        return 0.0;
    }

    let duration = time_to_maturity * DURATION_PROXY_FACTOR;
    let rate_change = ois_rate_now - deal.ois_equivalent_rate;
    let pnl = -deal.direction.sign() * rate_change * deal.amount * duration;
    finite_or_zero(&deal.deal_id, "mtm", pnl)
}

/// Rate PnL: directional exposure to the curve shift, scaled by a fixed
/// sensitivity.
///
/// ```text
/// rate = sign * (ois_now - ois_equivalent_rate) * amount
///        * time_to_maturity * RATE_SENSITIVITY
/// ```
#[must_use]
pub fn rate_pnl(deal: &Deal, ois_rate_now: f64, valuation_date: NaiveDate) -> f64 {
    if deal.is_expired(valuation_date) {
        return 0.0;
    }

    let time_to_maturity = year_fraction(valuation_date, deal.maturity_date);
    if time_to_maturity <= 0.0 {
        return 0.0;
    }

    let curve_shift = ois_rate_now - deal.ois_equivalent_rate;
    let pnl =
        deal.direction.sign() * curve_shift * deal.amount * time_to_maturity * RATE_SENSITIVITY;
    finite_or_zero(&deal.deal_id, "rate", pnl)
}

/// Liquidity PnL: an unwind spread applied against the position
/// direction, growing with size and remaining term, capped at 10bp.
///
/// ```text
/// size_factor     = min(amount / LIQUIDITY_SIZE_SCALE, 1)
/// maturity_factor = min(time_to_maturity, 1)
/// spread          = size_factor * maturity_factor * LIQUIDITY_SPREAD_CAP
/// liquidity       = -sign * spread * amount
/// ```
#[must_use]
pub fn liquidity_pnl(deal: &Deal, valuation_date: NaiveDate) -> f64 {
    if deal.is_expired(valuation_date) {
        return 0.0;
    }

    let time_to_maturity = year_fraction(valuation_date, deal.maturity_date);
    if time_to_maturity <= 0.0 {
        return 0.0;
    }

    let size_factor = (deal.amount / LIQUIDITY_SIZE_SCALE).min(1.0);
    let maturity_factor = time_to_maturity.min(1.0);
    let spread = size_factor * maturity_factor * LIQUIDITY_SPREAD_CAP;
    let pnl = -deal.direction.sign() * spread * deal.amount;
    finite_or_zero(&deal.deal_id, "liquidity", pnl)
}
