//! The analytics projection of the portfolio PnL table.
//!
//! Risk layers consume this projection, never raw deals: the projection
//! fixes tenor buckets, size categories and urgency flags once so every
//! downstream calculation classifies positions identically.

use crate::buckets::{SizeCategory, TenorBucket};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use tsy_core::dates::days_to_maturity;
use tsy_pnl::{PortfolioRow, PortfolioTable};

/// Trader label used when the deal carries no trader id.
pub const UNKNOWN_TRADER: &str = "Unknown";

/// One position in the analytics view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Deal identifier.
    pub deal_id: String,
    /// Currency pair as quoted on the deal.
    pub pair: String,
    /// Base currency (left leg).
    pub base_currency: String,
    /// Quote currency (right leg, "USD" for single-currency deals).
    pub quote_currency: String,
    /// Product kind string ("FX_SWAP", "IRS", ...).
    pub instrument: String,
    /// Trader id, [`UNKNOWN_TRADER`] when absent.
    pub trader_id: String,
    /// Notional amount.
    pub notional: f64,
    /// Notional in millions.
    pub notional_m: f64,
    /// Trade date.
    pub trade_date: NaiveDate,
    /// Maturity date.
    pub maturity_date: NaiveDate,
    /// Signed days from valuation date to maturity.
    pub days_to_maturity: i64,
    /// Maturity bucket.
    pub tenor: TenorBucket,
    /// Size category from the notional in millions.
    pub size_category: SizeCategory,
    /// Total PnL.
    pub pnl_total: f64,
    /// Total PnL in millions.
    pub pnl_total_m: f64,
    /// Accrued component.
    pub pnl_accrued: f64,
    /// Mark-to-market component.
    pub pnl_mtm: f64,
    /// Client rate.
    pub client_rate: f64,
    /// OIS rate used in the valuation.
    pub ois_rate: f64,
    /// Matures within seven days.
    pub is_urgent: bool,
    /// Already matured.
    pub is_expired: bool,
}

impl ProjectionRow {
    /// Projects one portfolio row.
    #[must_use]
    pub fn from_portfolio_row(row: &PortfolioRow, valuation_date: NaiveDate) -> Self {
        let days = days_to_maturity(row.maturity_date, valuation_date);
        let notional_m = row.amount / 1_000_000.0;
        Self {
            deal_id: row.deal_id.clone(),
            pair: row.pair_currency.clone(),
            base_currency: row.base_currency.clone(),
            quote_currency: quote_of(&row.pair_currency),
            instrument: row.product.clone(),
            trader_id: row
                .trader_id
                .clone()
                .unwrap_or_else(|| UNKNOWN_TRADER.to_string()),
            notional: row.amount,
            notional_m,
            trade_date: row.trade_date,
            maturity_date: row.maturity_date,
            days_to_maturity: days,
            tenor: TenorBucket::classify(row.time_to_maturity_years),
            size_category: SizeCategory::classify(notional_m),
            pnl_total: row.total_pnl,
            pnl_total_m: row.total_pnl / 1_000_000.0,
            pnl_accrued: row.accrued_pnl,
            pnl_mtm: row.mtm_pnl,
            client_rate: row.client_rate,
            ois_rate: row.ois_rate_now,
            is_urgent: days <= 7,
            is_expired: days < 0,
        }
    }
}

fn quote_of(pair: &str) -> String {
    match pair.split_once('/') {
        Some((_, quote)) => quote.to_string(),
        None => "USD".to_string(),
    }
}

/// The full analytics projection, one row per portfolio row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Projected positions, in table order.
    pub rows: Vec<ProjectionRow>,
    /// Valuation date the projection was built for.
    pub valuation_date: NaiveDate,
}

impl Projection {
    /// Projects a portfolio table. Row count and order are preserved.
    #[must_use]
    pub fn from_table(table: &PortfolioTable) -> Self {
        let rows: Vec<ProjectionRow> = table
            .rows
            .iter()
            .map(|row| ProjectionRow::from_portfolio_row(row, table.valuation_date))
            .collect();
        info!("Projected {} portfolio rows", rows.len());
        Self {
            rows,
            valuation_date: table.valuation_date,
        }
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the projection has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total notional across positions.
    #[must_use]
    pub fn total_notional(&self) -> f64 {
        self.rows.iter().map(|r| r.notional).sum()
    }

    /// Total PnL across positions.
    #[must_use]
    pub fn total_pnl(&self) -> f64 {
        self.rows.iter().map(|r| r.pnl_total).sum()
    }

    /// Positions of the given instrument kind.
    pub fn rows_for_instrument<'a>(
        &'a self,
        instrument: &'a str,
    ) -> impl Iterator<Item = &'a ProjectionRow> {
        self.rows.iter().filter(move |r| r.instrument == instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsy_core::{Deal, Direction, PnLConfig, ProductKind};
    use tsy_market::MarketSnapshot;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table() -> PortfolioTable {
        let deals = vec![
            Deal::builder()
                .deal_id("A1")
                .product(ProductKind::FxSwap)
                .direction(Direction::Loan)
                .pair_currency("EUR/USD")
                .amount(75_000_000.0)
                .trade_date(d(2025, 1, 10))
                .value_date(d(2025, 1, 12))
                .maturity_date(d(2025, 3, 5))
                .client_rate(0.045)
                .ois_equivalent_rate(0.043)
                .build()
                .unwrap(),
            Deal::builder()
                .deal_id("A2")
                .product(ProductKind::Irs)
                .direction(Direction::Deposit)
                .pair_currency("USD")
                .amount(5_000_000.0)
                .trade_date(d(2025, 1, 10))
                .value_date(d(2025, 1, 12))
                .maturity_date(d(2028, 1, 12))
                .client_rate(0.050)
                .ois_equivalent_rate(0.049)
                .build()
                .unwrap(),
        ];
        PortfolioTable::compute(
            &deals,
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        )
    }

    #[test]
    fn test_projection_preserves_order_and_count() {
        let proj = Projection::from_table(&table());
        assert_eq!(proj.len(), 2);
        assert_eq!(proj.rows[0].deal_id, "A1");
        assert_eq!(proj.rows[1].deal_id, "A2");
    }

    #[test]
    fn test_pair_split_and_quote_default() {
        let proj = Projection::from_table(&table());
        assert_eq!(proj.rows[0].base_currency, "EUR");
        assert_eq!(proj.rows[0].quote_currency, "USD");
        assert_eq!(proj.rows[1].base_currency, "USD");
        assert_eq!(proj.rows[1].quote_currency, "USD");
    }

    #[test]
    fn test_urgency_and_size() {
        let proj = Projection::from_table(&table());
        let fx = &proj.rows[0];
        assert_eq!(fx.days_to_maturity, 4);
        assert!(fx.is_urgent);
        assert!(!fx.is_expired);
        assert_eq!(fx.size_category, SizeCategory::Large);

        let irs = &proj.rows[1];
        assert!(!irs.is_urgent);
        assert_eq!(irs.size_category, SizeCategory::Small);
        assert_eq!(irs.tenor, TenorBucket::Y5);
    }

    #[test]
    fn test_missing_trader_becomes_unknown() {
        let proj = Projection::from_table(&table());
        assert_eq!(proj.rows[0].trader_id, UNKNOWN_TRADER);
    }
}
