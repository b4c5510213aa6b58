//! Correlated Monte Carlo VaR and expected shortfall.
//!
//! One exposure per currency pair, a correlated FX shock vector per
//! simulation, and a univariate rate shock layered on top when the
//! portfolio holds IRS positions. Results carry the raw simulation
//! arrays and every parameter needed to reproduce them bit for bit.

use crate::correlation::{correlation_matrix, covariance_matrix, pair_volatility};
use crate::error::{RiskError, RiskResult};
use log::{error, info, warn};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tsy_analytics::Projection;

/// Rate shock volatility, 8bp.
pub const RATE_SIGMA: f64 = 0.0008;

/// Fraction of total notional exposed to the rate shock.
pub const RATE_NOTIONAL_SCALE: f64 = 0.25;

/// Monte Carlo run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskParameters {
    /// Number of simulations.
    pub n_simulations: usize,
    /// RNG seed. Identical seed and portfolio reproduce identical output.
    pub seed: u64,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            n_simulations: 50_000,
            seed: 123,
        }
    }
}

impl RiskParameters {
    fn validate(&self) -> RiskResult<()> {
        if self.n_simulations == 0 {
            return Err(RiskError::invalid_parameter(
                "n_simulations",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Everything needed to reproduce a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationParams {
    /// Number of simulations run.
    pub n_simulations: usize,
    /// Seed used.
    pub seed: u64,
    /// Volatility proxy per pair, in pair order.
    pub volatilities: Vec<f64>,
    /// Correlation matrix rows, in pair order.
    pub correlation_matrix: Vec<Vec<f64>>,
}

/// Output of one Monte Carlo run.
///
/// An empty portfolio or an internal failure yields the empty result
/// (all vectors empty, all measures zero) rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskSimulationResult {
    /// Simulated total PnL, one entry per simulation.
    pub total_pnl: Vec<f64>,
    /// 5th percentile of the total distribution.
    pub var_95: f64,
    /// 1st percentile of the total distribution.
    pub var_99: f64,
    /// Mean of outcomes at or below the 95% VaR.
    pub expected_shortfall: f64,
    /// FX component per simulation.
    pub fx_component: Vec<f64>,
    /// Rate component per simulation (all zero without IRS positions).
    pub rate_component: Vec<f64>,
    /// Distinct currency pairs, sorted.
    pub pairs: Vec<String>,
    /// Notional exposure per pair, aligned with `pairs`.
    pub exposures: Vec<f64>,
    /// Reproducibility record.
    pub simulation_params: SimulationParams,
}

impl RiskSimulationResult {
    /// True when the run produced no simulations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_pnl.is_empty()
    }
}

/// Per-component VaR extracted from a simulation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentVar {
    /// 95% VaR of the FX component.
    pub fx_var_95: f64,
    /// 99% VaR of the FX component.
    pub fx_var_99: f64,
    /// 95% VaR of the rate component.
    pub rate_var_95: f64,
    /// 99% VaR of the rate component.
    pub rate_var_99: f64,
    /// 95% VaR of the total distribution.
    pub total_var_95: f64,
    /// 99% VaR of the total distribution.
    pub total_var_99: f64,
}

/// Linear-interpolated percentile of an unsorted sample.
///
/// `p` is in percent. Empty input yields 0.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// Runs the Monte Carlo simulation over a projection.
///
/// Never fails: an empty projection yields the empty result, and any
/// internal error is logged and also yields the empty result.
#[must_use]
pub fn run_simulation(projection: &Projection, params: &RiskParameters) -> RiskSimulationResult {
    match try_run(projection, params) {
        Ok(result) => result,
        Err(e) => {
            error!("Monte Carlo simulation failed: {e}");
            RiskSimulationResult::default()
        }
    }
}

fn try_run(
    projection: &Projection,
    params: &RiskParameters,
) -> RiskResult<RiskSimulationResult> {
    params.validate()?;

    if projection.is_empty() {
        warn!("Empty projection, skipping Monte Carlo");
        return Ok(RiskSimulationResult::default());
    }

    // Exposure per pair; BTreeMap fixes the pair order.
    let mut exposure_map: BTreeMap<String, f64> = BTreeMap::new();
    for row in &projection.rows {
        *exposure_map.entry(row.pair.clone()).or_insert(0.0) += row.notional;
    }
    let pairs: Vec<String> = exposure_map.keys().cloned().collect();
    let exposures: Vec<f64> = exposure_map.values().copied().collect();
    let n = pairs.len();
    let total_notional: f64 = exposures.iter().sum();

    info!(
        "Monte Carlo: {n} pairs, {:.1}M notional, {} simulations",
        total_notional / 1e6,
        params.n_simulations
    );

    let cov = covariance_matrix(&pairs);
    let chol: Cholesky<f64, Dyn> = Cholesky::new(cov)
        .ok_or(RiskError::CovarianceNotPositiveDefinite { size: n })?;
    let factor: DMatrix<f64> = chol.l();
    let exposure_vec = DVector::from_column_slice(&exposures);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut fx_component = Vec::with_capacity(params.n_simulations);
    for _ in 0..params.n_simulations {
        let z = DVector::from_fn(n, |_, _| rng.sample::<f64, _>(StandardNormal));
        let shocks = &factor * z;
        fx_component.push(shocks.dot(&exposure_vec));
    }

    let irs_count = projection.rows_for_instrument("IRS").count();
    let rate_component: Vec<f64> = if irs_count > 0 {
        let scale =
            total_notional * RATE_NOTIONAL_SCALE * (irs_count as f64 / projection.len() as f64);
        (0..params.n_simulations)
            .map(|_| rng.sample::<f64, _>(StandardNormal) * RATE_SIGMA * scale)
            .collect()
    } else {
        vec![0.0; params.n_simulations]
    };

    let total_pnl: Vec<f64> = fx_component
        .iter()
        .zip(&rate_component)
        .map(|(fx, rate)| fx + rate)
        .collect();

    let var_95 = percentile(&total_pnl, 5.0);
    let var_99 = percentile(&total_pnl, 1.0);
    let tail: Vec<f64> = total_pnl.iter().copied().filter(|&x| x <= var_95).collect();
    let expected_shortfall = if tail.is_empty() {
        var_95
    } else {
        tail.iter().sum::<f64>() / tail.len() as f64
    };

    info!(
        "Monte Carlo done: VaR95={:.1}M, VaR99={:.1}M",
        var_95 / 1e6,
        var_99 / 1e6
    );

    let corr = correlation_matrix(&pairs);
    Ok(RiskSimulationResult {
        total_pnl,
        var_95,
        var_99,
        expected_shortfall,
        fx_component,
        rate_component,
        pairs: pairs.clone(),
        exposures,
        simulation_params: SimulationParams {
            n_simulations: params.n_simulations,
            seed: params.seed,
            volatilities: pairs.iter().map(|p| pair_volatility(p)).collect(),
            correlation_matrix: (0..n)
                .map(|i| (0..n).map(|j| corr[(i, j)]).collect())
                .collect(),
        },
    })
}

/// Extracts per-component VaR from a simulation result.
///
/// The empty result maps to all-zero component VaR.
#[must_use]
pub fn component_var(result: &RiskSimulationResult) -> ComponentVar {
    if result.is_empty() {
        return ComponentVar::default();
    }
    ComponentVar {
        fx_var_95: percentile(&result.fx_component, 5.0),
        fx_var_99: percentile(&result.fx_component, 1.0),
        rate_var_95: percentile(&result.rate_component, 5.0),
        rate_var_99: percentile(&result.rate_component, 1.0),
        total_var_95: result.var_95,
        total_var_99: result.var_99,
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

    fn deal(id: &str, pair: &str, product: ProductKind, amount: f64) -> Deal {
        Deal::builder()
            .deal_id(id)
            .product(product)
            .direction(Direction::Loan)
            .pair_currency(pair)
            .amount(amount)
            .trade_date(d(2025, 1, 10))
            .value_date(d(2025, 1, 12))
            .maturity_date(d(2025, 12, 12))
            .client_rate(0.045)
            .ois_equivalent_rate(0.043)
            .build()
            .unwrap()
    }

    fn projection(deals: &[Deal]) -> Projection {
        let table = PortfolioTable::compute(
            deals,
            &PnLConfig::default(),
            &MarketSnapshot::mock(),
            d(2025, 3, 1),
        );
        Projection::from_table(&table)
    }

    fn mixed_portfolio() -> Projection {
        projection(&[
            deal("R1", "EUR/USD", ProductKind::FxSwap, 50_000_000.0),
            deal("R2", "USD/JPY", ProductKind::FxSwap, 30_000_000.0),
            deal("R3", "USD", ProductKind::Irs, 20_000_000.0),
        ])
    }

    #[test]
    fn test_percentile_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&values, 0.0), 1.0);
        assert_relative_eq!(percentile(&values, 50.0), 3.0);
        assert_relative_eq!(percentile(&values, 100.0), 5.0);
        assert_relative_eq!(percentile(&values, 25.0), 2.0);
        assert_relative_eq!(percentile(&values, 10.0), 1.4, epsilon = 1e-12);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_same_seed_reproduces_bit_identical_results() {
        let proj = mixed_portfolio();
        let params = RiskParameters {
            n_simulations: 2_000,
            seed: 42,
        };
        let a = run_simulation(&proj, &params);
        let b = run_simulation(&proj, &params);
        assert_eq!(a.total_pnl, b.total_pnl);
        assert_eq!(a.var_95, b.var_95);
        assert_eq!(a.expected_shortfall, b.expected_shortfall);
    }

    #[test]
    fn test_different_seeds_differ() {
        let proj = mixed_portfolio();
        let a = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 2_000,
                seed: 1,
            },
        );
        let b = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 2_000,
                seed: 2,
            },
        );
        assert_ne!(a.total_pnl, b.total_pnl);
    }

    #[test]
    fn test_var_ordering() {
        let proj = mixed_portfolio();
        let result = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 20_000,
                seed: 7,
            },
        );
        assert!(result.var_99 <= result.var_95);
        assert!(result.expected_shortfall <= result.var_95);
    }

    #[test]
    fn test_empty_projection_empty_result() {
        let proj = projection(&[]);
        let result = run_simulation(&proj, &RiskParameters::default());
        assert!(result.is_empty());
        assert_eq!(result.var_95, 0.0);
    }

    #[test]
    fn test_zero_simulations_rejected_softly() {
        let proj = mixed_portfolio();
        let result = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 0,
                seed: 1,
            },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_rate_component_zero_without_irs() {
        let proj = projection(&[deal("R1", "EUR/USD", ProductKind::FxSwap, 50_000_000.0)]);
        let result = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 500,
                seed: 9,
            },
        );
        assert!(result.rate_component.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_exposures_grouped_per_pair_sorted() {
        let proj = projection(&[
            deal("R1", "EUR/USD", ProductKind::FxSwap, 30_000_000.0),
            deal("R2", "EUR/USD", ProductKind::FxSwap, 20_000_000.0),
            deal("R3", "USD/JPY", ProductKind::FxSwap, 10_000_000.0),
        ]);
        let result = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 100,
                seed: 9,
            },
        );
        assert_eq!(result.pairs, vec!["EUR/USD".to_string(), "USD/JPY".to_string()]);
        assert_relative_eq!(result.exposures[0], 50_000_000.0);
        assert_relative_eq!(result.exposures[1], 10_000_000.0);
    }

    #[test]
    fn test_component_var_of_empty_result() {
        assert_eq!(
            component_var(&RiskSimulationResult::default()),
            ComponentVar::default()
        );
    }

    #[test]
    fn test_total_is_fx_plus_rate() {
        let proj = mixed_portfolio();
        let result = run_simulation(
            &proj,
            &RiskParameters {
                n_simulations: 500,
                seed: 11,
            },
        );
        for i in 0..result.total_pnl.len() {
            assert_relative_eq!(
                result.total_pnl[i],
                result.fx_component[i] + result.rate_component[i],
                epsilon = 1e-9
            );
        }
    }
}
