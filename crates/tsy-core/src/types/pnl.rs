//! PnL result and configuration types.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tolerance for the decomposition law `total == sum of components`.
pub const PNL_SUM_TOLERANCE: f64 = 1e-6;

/// The four signed PnL components for one deal, plus their sum.
///
/// Recomputed fresh on every run; never partially updated. An expired
/// deal carries all-zero components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealPnL {
    /// Deal identifier this result belongs to.
    pub deal_id: String,

    /// Realized carry from the client/OIS rate differential.
    pub accrued_pnl: f64,

    /// Mark-to-market from curve movement since inception.
    pub mtm_pnl: f64,

    /// Curve-shift sensitivity component.
    pub rate_pnl: f64,

    /// Liquidity cost component (always a cost).
    pub liquidity_pnl: f64,

    /// Sum of the four components.
    pub total_pnl: f64,

    /// OIS rate actually used in the valuation.
    pub ois_rate_used: f64,

    /// When this result was computed.
    pub calculation_timestamp: DateTime<Utc>,
}

impl DealPnL {
    /// An all-zero result for an expired or failed deal.
    #[must_use]
    pub fn zeroed(deal_id: impl Into<String>) -> Self {
        Self {
            deal_id: deal_id.into(),
            accrued_pnl: 0.0,
            mtm_pnl: 0.0,
            rate_pnl: 0.0,
            liquidity_pnl: 0.0,
            total_pnl: 0.0,
            ois_rate_used: 0.0,
            calculation_timestamp: Utc::now(),
        }
    }

    /// Total PnL in millions.
    #[must_use]
    pub fn total_pnl_m(&self) -> f64 {
        self.total_pnl / 1_000_000.0
    }

    /// Checks the decomposition law within [`PNL_SUM_TOLERANCE`].
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let sum = self.accrued_pnl + self.mtm_pnl + self.rate_pnl + self.liquidity_pnl;
        (sum - self.total_pnl).abs() <= PNL_SUM_TOLERANCE
    }
}

/// Configuration for PnL decomposition.
///
/// Components default to enabled. The optional OIS override bypasses the
/// curve lookup entirely and must be a decimal in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnLConfig {
    /// Compute the accrued component.
    pub calculate_accrued: bool,

    /// Compute the mark-to-market component.
    pub calculate_mtm: bool,

    /// Compute the rate component.
    pub calculate_rate: bool,

    /// Compute the liquidity component.
    pub calculate_liquidity: bool,

    /// Fixed OIS rate to use instead of the curve lookup.
    pub ois_rate_override: Option<f64>,
}

impl Default for PnLConfig {
    fn default() -> Self {
        Self {
            calculate_accrued: true,
            calculate_mtm: true,
            calculate_rate: true,
            calculate_liquidity: true,
            ois_rate_override: None,
        }
    }
}

impl PnLConfig {
    /// All components enabled, no override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed OIS rate, bypassing the curve lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidField`] when the rate is outside `[0, 1]`.
    pub fn with_ois_override(mut self, rate: f64) -> CoreResult<Self> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(CoreError::invalid_field(
                "ois_rate_override",
                "must be a decimal in [0, 1]",
            ));
        }
        self.ois_rate_override = Some(rate);
        Ok(self)
    }

    /// Disables every component; useful for notional-only runs.
    #[must_use]
    pub fn none() -> Self {
        Self {
            calculate_accrued: false,
            calculate_mtm: false,
            calculate_rate: false,
            calculate_liquidity: false,
            ois_rate_override: None,
        }
    }
}
