//! # Tsy Risk
//!
//! Risk measures for the Tsy treasury analytics library.
//!
//! Every engine here consumes the [`tsy_analytics::Projection`], never
//! raw deals, and follows the same fail-soft contract: an empty
//! portfolio or an internal failure produces an empty result with a
//! logged error, not a panic or an escaping `Err`.
//!
//! - [`run_simulation`] — correlated Monte Carlo VaR₉₅/VaR₉₉ and
//!   expected shortfall, with per-pair volatility proxies, a hand-built
//!   correlation block structure, and full reproducibility from the
//!   recorded seed and parameters
//! - [`analytical_var`] — closed-form one-day VaR in quadrature, a
//!   cheap conservative cross-check
//! - [`stress_test`] — named FX/rate shock scenarios applied to
//!   product-level notionals
//! - [`check_limits`] — configurable portfolio limit checks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytical;
pub mod correlation;
pub mod error;
pub mod limits;
pub mod monte_carlo;
pub mod stress;

pub use analytical::{analytical_var, AnalyticalVar, ConfidenceLevel};
pub use correlation::{correlation_matrix, covariance_matrix, pair_volatility};
pub use error::{RiskError, RiskResult};
pub use limits::{check_limits, LimitBreaches, RiskLimits};
pub use monte_carlo::{
    component_var, percentile, run_simulation, ComponentVar, RiskParameters,
    RiskSimulationResult, SimulationParams,
};
pub use stress::{default_scenarios, stress_test, Scenario, StressRow};
