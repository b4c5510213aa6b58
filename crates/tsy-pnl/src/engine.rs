//! Per-deal PnL decomposition.

use crate::components::{accrued_pnl, liquidity_pnl, mtm_pnl, rate_pnl};
use crate::constants::FALLBACK_OIS_RATE_NOW;
use chrono::{NaiveDate, Utc};
use log::warn;
use tsy_core::{Deal, DealPnL, PnLConfig};
use tsy_market::MarketSnapshot;

/// Resolves the current OIS rate for a deal.
///
/// Order of precedence: config override, then the snapshot curve for the
/// deal's base currency at its residual maturity. A non-finite result
/// from either source degrades to [`FALLBACK_OIS_RATE_NOW`] with a
/// warning; resolution never fails.
#[must_use]
pub fn resolve_ois_rate(
    deal: &Deal,
    config: &PnLConfig,
    market: &MarketSnapshot,
    time_to_maturity: f64,
) -> f64 {
    let rate = match config.ois_rate_override {
        Some(rate) => rate,
        None => market.ois_rate(deal.base_currency(), time_to_maturity).value,
    };

    if rate.is_finite() {
        rate
    } else {
        warn!(
            "OIS resolution for deal {} produced a non-finite rate, using {FALLBACK_OIS_RATE_NOW}",
            deal.deal_id
        );
        FALLBACK_OIS_RATE_NOW
    }
}

/// Computes the four PnL components for one deal.
///
/// An expired deal (`maturity_date <= valuation_date`) returns an
/// all-zero result with `ois_rate_used = 0`. Components disabled in the
/// config are reported as zero. The result always satisfies the
/// decomposition law `total == accrued + mtm + rate + liquidity`.
#[must_use]
pub fn deal_pnl(
    deal: &Deal,
    config: &PnLConfig,
    market: &MarketSnapshot,
    valuation_date: NaiveDate,
) -> DealPnL {
    if deal.is_expired(valuation_date) {
        return DealPnL::zeroed(&deal.deal_id);
    }

    let time_to_maturity = tsy_core::dates::year_fraction(valuation_date, deal.maturity_date);
    let ois_rate_now = resolve_ois_rate(deal, config, market, time_to_maturity);

    let accrued = if config.calculate_accrued {
        accrued_pnl(deal, valuation_date)
    } else {
        0.0
    };
    let mtm = if config.calculate_mtm {
        mtm_pnl(deal, ois_rate_now, valuation_date)
    } else {
        0.0
    };
    let rate = if config.calculate_rate {
        rate_pnl(deal, ois_rate_now, valuation_date)
    } else {
        0.0
    };
    let liquidity = if config.calculate_liquidity {
        liquidity_pnl(deal, valuation_date)
    } else {
        0.0
    };

    DealPnL {
        deal_id: deal.deal_id.clone(),
        accrued_pnl: accrued,
        mtm_pnl: mtm,
        rate_pnl: rate,
        liquidity_pnl: liquidity,
        total_pnl: accrued + mtm + rate + liquidity,
        ois_rate_used: ois_rate_now,
        calculation_timestamp: Utc::now(),
    }
}
