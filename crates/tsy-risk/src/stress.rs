//! Stress scenarios: fixed FX and rate shocks applied to the
//! portfolio's product-level notionals.

use log::info;
use serde::{Deserialize, Serialize};
use tsy_analytics::Projection;

/// Duration proxy applied to the rate shock on IRS notional.
pub const STRESS_RATE_DURATION: f64 = 2.0;

/// One stress scenario: a parallel FX move and a parallel rate move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// FX shock as a fraction (-0.15 = 15% depreciation).
    pub fx_shock: f64,
    /// Rate shock as a fraction (0.02 = +200bp).
    pub rate_shock: f64,
}

impl Scenario {
    /// Builds a named scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, fx_shock: f64, rate_shock: f64) -> Self {
        Self {
            name: name.into(),
            fx_shock,
            rate_shock,
        }
    }
}

/// The standard scenario set.
#[must_use]
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Systemic Crisis", -0.15, 0.02),
        Scenario::new("Fed Tightening", -0.05, 0.015),
        Scenario::new("EM Crisis", -0.08, 0.005),
        Scenario::new("Extreme Volatility", -0.12, 0.01),
        Scenario::new("Carry Trade Unwind", -0.06, -0.01),
    ]
}

/// Impact of one scenario on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressRow {
    /// Scenario name.
    pub scenario: String,
    /// FX shock input, percent.
    pub fx_shock_pct: f64,
    /// Rate shock input, basis points.
    pub rate_shock_bps: f64,
    /// FX impact, absolute.
    pub fx_pnl: f64,
    /// FX impact, millions.
    pub fx_pnl_m: f64,
    /// Rate impact, absolute.
    pub rate_pnl: f64,
    /// Rate impact, millions.
    pub rate_pnl_m: f64,
    /// Total impact, absolute.
    pub total_pnl: f64,
    /// Total impact, millions.
    pub total_pnl_m: f64,
    /// Reference total notional, millions.
    pub total_notional_m: f64,
}

/// Applies a scenario set to a projection, one row per scenario.
///
/// FX shocks hit FX swap notional; rate shocks hit IRS notional through
/// the fixed duration proxy. An empty projection yields no rows.
#[must_use]
pub fn stress_test(projection: &Projection, scenarios: &[Scenario]) -> Vec<StressRow> {
    if projection.is_empty() {
        return Vec::new();
    }

    let total_notional = projection.total_notional();
    let fx_notional: f64 = projection
        .rows_for_instrument("FX_SWAP")
        .map(|r| r.notional)
        .sum();
    let irs_notional: f64 = projection
        .rows_for_instrument("IRS")
        .map(|r| r.notional)
        .sum();

    let rows: Vec<StressRow> = scenarios
        .iter()
        .map(|scenario| {
            let fx_pnl = fx_notional * scenario.fx_shock;
            let rate_pnl = irs_notional * scenario.rate_shock * STRESS_RATE_DURATION;
            let total_pnl = fx_pnl + rate_pnl;
            StressRow {
                scenario: scenario.name.clone(),
                fx_shock_pct: scenario.fx_shock * 100.0,
                rate_shock_bps: scenario.rate_shock * 10_000.0,
                fx_pnl,
                fx_pnl_m: fx_pnl / 1_000_000.0,
                rate_pnl,
                rate_pnl_m: rate_pnl / 1_000_000.0,
                total_pnl,
                total_pnl_m: total_pnl / 1_000_000.0,
                total_notional_m: total_notional / 1_000_000.0,
            }
        })
        .collect();

    info!("Stress test: {} scenarios applied", rows.len());
    rows
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

    fn deal(id: &str, product: ProductKind, amount: f64) -> Deal {
        Deal::builder()
            .deal_id(id)
            .product(product)
            .direction(Direction::Loan)
            .pair_currency("EUR/USD")
            .amount(amount)
            .trade_date(d(2025, 1, 10))
            .value_date(d(2025, 1, 12))
            .maturity_date(d(2025, 12, 12))
            .client_rate(0.045)
            .ois_equivalent_rate(0.043)
            .build()
            .unwrap()
    }

    fn projection() -> Projection {
        let deals = vec![
            deal("S1", ProductKind::FxSwap, 100_000_000.0),
            deal("S2", ProductKind::Irs, 50_000_000.0),
            deal("S3", ProductKind::Deposit, 25_000_000.0),
        ];
        let table = PortfolioTable::compute(
            &deals,
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        Projection::from_table(&table)
    }

    #[test]
    fn test_impact_formula() {
        let scenario = Scenario::new("Parallel", -0.10, 0.01);
        let rows = stress_test(&projection(), &[scenario]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        // FX: 100M * -10%; rate: 50M * 1% * 2.0; deposits untouched.
        assert_relative_eq!(row.fx_pnl, -10_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(row.rate_pnl, 1_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(row.total_pnl, -9_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(row.total_notional_m, 175.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_scenario_set() {
        let scenarios = default_scenarios();
        assert_eq!(scenarios.len(), 5);
        let rows = stress_test(&projection(), &scenarios);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].scenario, "Systemic Crisis");
        assert_relative_eq!(rows[0].fx_shock_pct, -15.0, epsilon = 1e-12);
        assert_relative_eq!(rows[0].rate_shock_bps, 200.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_rate_shock() {
        let rows = stress_test(&projection(), &default_scenarios());
        let unwind = rows.iter().find(|r| r.scenario == "Carry Trade Unwind").unwrap();
        assert!(unwind.rate_pnl < 0.0);
    }

    #[test]
    fn test_empty_projection_no_rows() {
        let table = PortfolioTable::compute(
            &[],
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        let proj = Projection::from_table(&table);
        assert!(stress_test(&proj, &default_scenarios()).is_empty());
    }
}
