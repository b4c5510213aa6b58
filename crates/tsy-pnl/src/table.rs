//! Portfolio PnL table: one row per deal, deal fields joined with the
//! valuation result.
//!
//! The column set is a stable contract consumed by reporting and risk
//! layers; add columns at the end, never rename or reorder. The table
//! always has exactly one row per input deal, in input order. A deal
//! whose valuation degrades produces a zero-valued row carrying an
//! error note instead of disturbing the batch.

use crate::engine::deal_pnl;
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tsy_core::dates::year_fraction;
use tsy_core::{Deal, DealPnL, PnLConfig};
use tsy_market::MarketSnapshot;

/// One row of the portfolio PnL table.
///
/// Column order matches the serialized contract:
/// `deal_id, comment, product, d_or_l, pair_currency, amount,
/// trade_date, value_date, maturity_date, client_rate,
/// ois_equivalent_rate, ois_rate_now, time_to_maturity_years,
/// accrued_pnl, mtm_pnl, rate_pnl, liquidity_pnl, total_pnl,
/// trader_id, base_currency, calculation_timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    /// Deal identifier.
    pub deal_id: String,
    /// Free-text deal description.
    pub comment: String,
    /// Product kind, serialized as "FX_SWAP" / "IRS" / "DEPOSIT" / "LOAN".
    pub product: String,
    /// Direction, "D" or "L".
    pub d_or_l: String,
    /// Currency pair or single currency as quoted on the deal.
    pub pair_currency: String,
    /// Notional amount.
    pub amount: f64,
    /// Trade date.
    pub trade_date: NaiveDate,
    /// Value date.
    pub value_date: NaiveDate,
    /// Maturity date.
    pub maturity_date: NaiveDate,
    /// Client rate (decimal).
    pub client_rate: f64,
    /// OIS-equivalent rate at trade time (decimal).
    pub ois_equivalent_rate: f64,
    /// OIS rate used for this valuation.
    pub ois_rate_now: f64,
    /// Residual maturity in years (ACT/365), zero when expired.
    pub time_to_maturity_years: f64,
    /// Accrued component.
    pub accrued_pnl: f64,
    /// Mark-to-market component.
    pub mtm_pnl: f64,
    /// Rate component.
    pub rate_pnl: f64,
    /// Liquidity component.
    pub liquidity_pnl: f64,
    /// Sum of the four components.
    pub total_pnl: f64,
    /// Trader identifier, if captured.
    pub trader_id: Option<String>,
    /// Base currency of the pair.
    pub base_currency: String,
    /// When the valuation ran.
    pub calculation_timestamp: DateTime<Utc>,
    /// Set when the valuation degraded and the PnL columns were zeroed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PortfolioRow {
    fn from_deal(deal: &Deal, pnl: DealPnL, valuation_date: NaiveDate) -> Self {
        let (pnl, error) = if pnl.is_consistent() && pnl.total_pnl.is_finite() {
            (pnl, None)
        } else {
            error!("Inconsistent valuation for deal {}, zeroing row", deal.deal_id);
            (
                DealPnL::zeroed(&deal.deal_id),
                Some("inconsistent valuation".to_string()),
            )
        };

        Self {
            deal_id: deal.deal_id.clone(),
            comment: deal.comment.clone(),
            product: deal.product.to_string(),
            d_or_l: deal.direction.to_string(),
            pair_currency: deal.pair_currency.clone(),
            amount: deal.amount,
            trade_date: deal.trade_date,
            value_date: deal.value_date,
            maturity_date: deal.maturity_date,
            client_rate: deal.client_rate,
            ois_equivalent_rate: deal.ois_equivalent_rate,
            ois_rate_now: pnl.ois_rate_used,
            time_to_maturity_years: year_fraction(valuation_date, deal.maturity_date),
            accrued_pnl: pnl.accrued_pnl,
            mtm_pnl: pnl.mtm_pnl,
            rate_pnl: pnl.rate_pnl,
            liquidity_pnl: pnl.liquidity_pnl,
            total_pnl: pnl.total_pnl,
            trader_id: deal.trader_id.clone(),
            base_currency: deal.base_currency().to_string(),
            calculation_timestamp: pnl.calculation_timestamp,
            error,
        }
    }

    /// Notional in millions.
    #[must_use]
    pub fn amount_m(&self) -> f64 {
        self.amount / 1_000_000.0
    }
}

/// The full portfolio PnL table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTable {
    /// One row per input deal, in input order.
    pub rows: Vec<PortfolioRow>,
    /// Valuation date the table was computed for.
    pub valuation_date: NaiveDate,
}

impl PortfolioTable {
    /// Values every deal against one shared snapshot.
    ///
    /// Exactly one output row per input deal, preserving input order.
    /// An empty batch yields an empty table.
    #[must_use]
    pub fn compute(
        deals: &[Deal],
        config: &PnLConfig,
        market: &MarketSnapshot,
        valuation_date: NaiveDate,
    ) -> Self {
        info!("Valuing {} deals as of {valuation_date}", deals.len());

        #[cfg(feature = "parallel")]
        let rows: Vec<PortfolioRow> = deals
            .par_iter()
            .map(|deal| {
                let pnl = deal_pnl(deal, config, market, valuation_date);
                PortfolioRow::from_deal(deal, pnl, valuation_date)
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<PortfolioRow> = deals
            .iter()
            .map(|deal| {
                let pnl = deal_pnl(deal, config, market, valuation_date);
                PortfolioRow::from_deal(deal, pnl, valuation_date)
            })
            .collect();

        Self {
            rows,
            valuation_date,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of `total_pnl` across all rows.
    #[must_use]
    pub fn total_pnl(&self) -> f64 {
        self.rows.iter().map(|r| r.total_pnl).sum()
    }

    /// Sum of notional across all rows.
    #[must_use]
    pub fn total_notional(&self) -> f64 {
        self.rows.iter().map(|r| r.amount).sum()
    }

    /// Rows for a given product kind string ("IRS", "FX_SWAP", ...).
    pub fn rows_for_product<'a>(
        &'a self,
        product: &'a str,
    ) -> impl Iterator<Item = &'a PortfolioRow> {
        self.rows.iter().filter(move |r| r.product == product)
    }
}
