//! Configurable risk limits and the portfolio limit check.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tsy_analytics::Projection;

/// Configurable portfolio limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum notional per currency pair.
    pub max_notional_per_pair: f64,
    /// Maximum share of notional in a single tenor bucket (fraction).
    pub max_tenor_concentration: f64,
    /// Maximum acceptable VaR estimate.
    pub var_limit: f64,
    /// Maximum positions maturing within seven days.
    pub max_urgent_deals: usize,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_notional_per_pair: 500_000_000.0,
            max_tenor_concentration: 0.40,
            var_limit: 1_000_000.0,
            max_urgent_deals: 5,
        }
    }
}

/// Outcome of a limit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LimitBreaches {
    /// Pairs whose summed notional exceeds the per-pair cap.
    pub pair_breaches: Vec<String>,
    /// Tenor buckets above the concentration cap.
    pub tenor_breaches: Vec<String>,
    /// VaR estimate exceeded the limit (unset when no estimate given).
    pub var_breach: bool,
    /// More urgent positions than allowed.
    pub urgent_breach: bool,
}

impl LimitBreaches {
    /// True when no limit is breached.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.pair_breaches.is_empty()
            && self.tenor_breaches.is_empty()
            && !self.var_breach
            && !self.urgent_breach
    }
}

/// Checks a projection (and an optional VaR estimate) against the limits.
#[must_use]
pub fn check_limits(
    projection: &Projection,
    limits: &RiskLimits,
    var_estimate: Option<f64>,
) -> LimitBreaches {
    let mut breaches = LimitBreaches::default();
    if projection.is_empty() {
        return breaches;
    }

    let mut per_pair: BTreeMap<&str, f64> = BTreeMap::new();
    let mut per_tenor: BTreeMap<String, f64> = BTreeMap::new();
    for row in &projection.rows {
        *per_pair.entry(row.pair.as_str()).or_insert(0.0) += row.notional;
        *per_tenor.entry(row.tenor.to_string()).or_insert(0.0) += row.notional;
    }

    for (pair, notional) in per_pair {
        if notional > limits.max_notional_per_pair {
            warn!("Pair {pair} breaches notional cap: {:.1}M", notional / 1e6);
            breaches.pair_breaches.push(pair.to_string());
        }
    }

    let total_notional = projection.total_notional();
    if total_notional > 0.0 {
        for (tenor, notional) in per_tenor {
            if notional / total_notional > limits.max_tenor_concentration {
                warn!("Tenor {tenor} breaches concentration cap");
                breaches.tenor_breaches.push(tenor);
            }
        }
    }

    if let Some(var) = var_estimate {
        breaches.var_breach = var.abs() > limits.var_limit;
    }

    let urgent = projection.rows.iter().filter(|r| r.is_urgent).count();
    breaches.urgent_breach = urgent > limits.max_urgent_deals;

    breaches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tsy_core::{Deal, Direction, PnLConfig, ProductKind};
    use tsy_market::MarketSnapshot;
    use tsy_pnl::PortfolioTable;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn projection(amount: f64, maturity: NaiveDate) -> Projection {
        let deal = Deal::builder()
            .deal_id("L1")
            .product(ProductKind::Deposit)
            .direction(Direction::Loan)
            .pair_currency("EUR/USD")
            .amount(amount)
            .trade_date(d(2025, 1, 10))
            .value_date(d(2025, 1, 12))
            .maturity_date(maturity)
            .client_rate(0.045)
            .ois_equivalent_rate(0.043)
            .build()
            .unwrap();
        let table = PortfolioTable::compute(
            &[deal],
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        Projection::from_table(&table)
    }

    #[test]
    fn test_pair_cap_breach() {
        let proj = projection(600_000_000.0, d(2025, 12, 1));
        let breaches = check_limits(&proj, &RiskLimits::default(), None);
        assert_eq!(breaches.pair_breaches, vec!["EUR/USD".to_string()]);
        assert!(!breaches.is_clean());
    }

    #[test]
    fn test_single_deal_always_breaches_tenor_concentration() {
        // One deal holds 100% of the book, above the 40% cap.
        let proj = projection(10_000_000.0, d(2025, 12, 1));
        let breaches = check_limits(&proj, &RiskLimits::default(), None);
        assert_eq!(breaches.tenor_breaches.len(), 1);
    }

    #[test]
    fn test_var_breach_uses_magnitude() {
        let proj = projection(10_000_000.0, d(2025, 12, 1));
        let breaches = check_limits(&proj, &RiskLimits::default(), Some(-2_000_000.0));
        assert!(breaches.var_breach);
        let ok = check_limits(&proj, &RiskLimits::default(), Some(-500_000.0));
        assert!(!ok.var_breach);
    }

    #[test]
    fn test_empty_projection_is_clean() {
        let table = PortfolioTable::compute(
            &[],
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        let breaches = check_limits(
            &Projection::from_table(&table),
            &RiskLimits::default(),
            None,
        );
        assert!(breaches.is_clean());
    }
}
