//! Closed-form VaR approximation.
//!
//! Per-currency exposure times a fixed volatility proxy and a z-score,
//! scaled to one day, combined in quadrature under a zero cross-currency
//! correlation assumption. Cheaper than the Monte Carlo engine and
//! deliberately conservative.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tsy_analytics::Projection;

/// Trading days per year for the one-day scaling.
pub const TRADING_DAYS: f64 = 252.0;

/// Volatility proxy for currencies not in the fixed map.
pub const DEFAULT_CCY_VOL: f64 = 0.12;

/// Supported confidence levels and their z-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// 90% one-sided.
    P90,
    /// 95% one-sided.
    P95,
    /// 99% one-sided.
    P99,
}

impl ConfidenceLevel {
    /// One-sided normal z-score.
    #[must_use]
    pub fn z_score(self) -> f64 {
        match self {
            Self::P90 => 1.28,
            Self::P95 => 1.65,
            Self::P99 => 2.33,
        }
    }

    /// The level as a fraction, e.g. 0.95.
    #[must_use]
    pub fn as_fraction(self) -> f64 {
        match self {
            Self::P90 => 0.90,
            Self::P95 => 0.95,
            Self::P99 => 0.99,
        }
    }
}

/// Fixed volatility proxy per base currency.
#[must_use]
pub fn currency_volatility(currency: &str) -> f64 {
    match currency {
        "USD" => 0.10,
        "EUR" => 0.12,
        "JPY" => 0.15,
        "GBP" => 0.14,
        "CHF" => 0.11,
        "AUD" => 0.16,
        "CAD" => 0.13,
        _ => DEFAULT_CCY_VOL,
    }
}

/// Analytical VaR broken down by currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyticalVar {
    /// One-day portfolio VaR.
    pub var_total: f64,
    /// One-day portfolio VaR in millions.
    pub var_total_m: f64,
    /// Confidence level as a fraction.
    pub confidence_level: f64,
    /// One-day VaR per base currency, sorted by currency.
    pub var_by_currency: BTreeMap<String, f64>,
    /// Total notional covered.
    pub total_notional: f64,
    /// VaR as a percentage of notional (0 when notional is 0).
    pub var_as_pct_notional: f64,
}

/// Computes the closed-form VaR of a projection.
///
/// An empty projection yields the all-zero result.
#[must_use]
pub fn analytical_var(projection: &Projection, level: ConfidenceLevel) -> AnalyticalVar {
    if projection.is_empty() {
        return AnalyticalVar::default();
    }

    let mut exposure_by_ccy: BTreeMap<String, f64> = BTreeMap::new();
    for row in &projection.rows {
        *exposure_by_ccy.entry(row.base_currency.clone()).or_insert(0.0) += row.notional;
    }

    let z = level.z_score();
    let mut var_by_currency = BTreeMap::new();
    let mut sum_squares = 0.0;
    for (ccy, notional) in &exposure_by_ccy {
        let var_1d = notional * currency_volatility(ccy) * z / TRADING_DAYS.sqrt();
        sum_squares += var_1d * var_1d;
        var_by_currency.insert(ccy.clone(), var_1d);
    }

    let var_total = sum_squares.sqrt();
    let total_notional: f64 = exposure_by_ccy.values().sum();

    info!(
        "Analytical VaR {:.0}%: {:.1}M",
        level.as_fraction() * 100.0,
        var_total / 1e6
    );

    AnalyticalVar {
        var_total,
        var_total_m: var_total / 1_000_000.0,
        confidence_level: level.as_fraction(),
        var_by_currency,
        total_notional,
        var_as_pct_notional: if total_notional > 0.0 {
            var_total / total_notional * 100.0
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use tsy_core::{Deal, Direction, PnLConfig, ProductKind};
    use tsy_market::MarketSnapshot;
    use tsy_pnl::PortfolioTable;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn projection(pairs_amounts: &[(&str, f64)]) -> Projection {
        let deals: Vec<Deal> = pairs_amounts
            .iter()
            .enumerate()
            .map(|(i, (pair, amount))| {
                Deal::builder()
                    .deal_id(format!("V{i}"))
                    .product(ProductKind::Deposit)
                    .direction(Direction::Loan)
                    .pair_currency(*pair)
                    .amount(*amount)
                    .trade_date(d(2025, 1, 10))
                    .value_date(d(2025, 1, 12))
                    .maturity_date(d(2025, 12, 12))
                    .client_rate(0.045)
                    .ois_equivalent_rate(0.043)
                    .build()
                    .unwrap()
            })
            .collect();
        let table = PortfolioTable::compute(
            &deals,
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        Projection::from_table(&table)
    }

    #[test]
    fn test_single_currency_var() {
        let proj = projection(&[("USD", 100_000_000.0)]);
        let result = analytical_var(&proj, ConfidenceLevel::P95);
        let expected = 100_000_000.0 * 0.10 * 1.65 / TRADING_DAYS.sqrt();
        assert_relative_eq!(result.var_total, expected, epsilon = 1e-6);
        assert_relative_eq!(result.var_by_currency["USD"], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_quadrature_combination() {
        let proj = projection(&[("USD", 50_000_000.0), ("EUR/USD", 50_000_000.0)]);
        let result = analytical_var(&proj, ConfidenceLevel::P99);
        let usd = result.var_by_currency["USD"];
        let eur = result.var_by_currency["EUR"];
        assert_relative_eq!(
            result.var_total,
            (usd * usd + eur * eur).sqrt(),
            epsilon = 1e-9
        );
        // Quadrature is below the plain sum.
        assert!(result.var_total < usd + eur);
    }

    #[test]
    fn test_unknown_currency_uses_default_vol() {
        let proj = projection(&[("SEK/USD", 10_000_000.0)]);
        let result = analytical_var(&proj, ConfidenceLevel::P90);
        let expected = 10_000_000.0 * DEFAULT_CCY_VOL * 1.28 / TRADING_DAYS.sqrt();
        assert_relative_eq!(result.var_by_currency["SEK"], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_higher_confidence_higher_var() {
        let proj = projection(&[("USD", 100_000_000.0)]);
        let v90 = analytical_var(&proj, ConfidenceLevel::P90).var_total;
        let v95 = analytical_var(&proj, ConfidenceLevel::P95).var_total;
        let v99 = analytical_var(&proj, ConfidenceLevel::P99).var_total;
        assert!(v90 < v95 && v95 < v99);
    }

    #[test]
    fn test_empty_projection() {
        let proj = projection(&[]);
        assert_eq!(
            analytical_var(&proj, ConfidenceLevel::P95),
            AnalyticalVar::default()
        );
    }
}
