//! Portfolio-level performance metrics.

use crate::projection::Projection;
use serde::{Deserialize, Serialize};

/// Headline metrics for one valued portfolio.
///
/// Ratios degrade to zero rather than dividing by zero: an empty
/// portfolio or a zero notional yields all-zero metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortfolioMetrics {
    /// Number of positions.
    pub deal_count: usize,
    /// Total notional.
    pub total_notional: f64,
    /// Total notional in millions.
    pub total_notional_m: f64,
    /// Total PnL.
    pub total_pnl: f64,
    /// Total PnL in millions.
    pub total_pnl_m: f64,
    /// PnL as a percentage of notional.
    pub roi_pct: f64,
    /// PnL in basis points of notional.
    pub pnl_bps: f64,
    /// Mean PnL per position.
    pub avg_pnl_per_deal: f64,
    /// Mean notional per position.
    pub avg_notional_per_deal: f64,
    /// Sample standard deviation of position PnL (0 for fewer than two).
    pub pnl_volatility: f64,
    /// Positions maturing within seven days.
    pub urgent_count: usize,
    /// Positions already matured.
    pub expired_count: usize,
}

impl PortfolioMetrics {
    /// Computes the metrics of a projection.
    #[must_use]
    pub fn compute(projection: &Projection) -> Self {
        let deal_count = projection.len();
        if deal_count == 0 {
            return Self::default();
        }

        let total_notional = projection.total_notional();
        let total_pnl = projection.total_pnl();

        let (roi_pct, pnl_bps) = if total_notional > 0.0 {
            (
                total_pnl / total_notional * 100.0,
                total_pnl / total_notional * 10_000.0,
            )
        } else {
            (0.0, 0.0)
        };

        let pnl_volatility = if deal_count > 1 {
            let mean = total_pnl / deal_count as f64;
            let var = projection
                .rows
                .iter()
                .map(|r| (r.pnl_total - mean).powi(2))
                .sum::<f64>()
                / (deal_count - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        Self {
            deal_count,
            total_notional,
            total_notional_m: total_notional / 1_000_000.0,
            total_pnl,
            total_pnl_m: total_pnl / 1_000_000.0,
            roi_pct,
            pnl_bps,
            avg_pnl_per_deal: total_pnl / deal_count as f64,
            avg_notional_per_deal: total_notional / deal_count as f64,
            pnl_volatility,
            urgent_count: projection.rows.iter().filter(|r| r.is_urgent).count(),
            expired_count: projection.rows.iter().filter(|r| r.is_expired).count(),
        }
    }
}
