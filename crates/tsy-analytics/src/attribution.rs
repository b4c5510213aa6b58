//! Concentration and PnL attribution by grouping dimension.

use crate::projection::{Projection, ProjectionRow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dimensions the portfolio can be grouped along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupBy {
    /// Base currency of the pair.
    BaseCurrency,
    /// Instrument kind.
    Instrument,
    /// Tenor bucket.
    Tenor,
    /// Trader id.
    Trader,
}

impl GroupBy {
    fn key_of(self, row: &ProjectionRow) -> String {
        match self {
            Self::BaseCurrency => row.base_currency.clone(),
            Self::Instrument => row.instrument.clone(),
            Self::Tenor => row.tenor.to_string(),
            Self::Trader => row.trader_id.clone(),
        }
    }
}

/// Aggregate statistics for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    /// Group key (currency code, instrument name, tenor label or trader id).
    pub key: String,
    /// Number of positions in the group.
    pub deal_count: usize,
    /// Summed notional.
    pub notional: f64,
    /// Summed notional in millions.
    pub notional_m: f64,
    /// Summed total PnL.
    pub pnl_total: f64,
    /// Summed total PnL in millions.
    pub pnl_total_m: f64,
    /// Mean PnL per position.
    pub pnl_mean: f64,
    /// PnL in basis points of the group notional (0 when notional is 0).
    pub pnl_bps: f64,
    /// Share of total portfolio notional, percent.
    pub concentration_pct: f64,
}

/// Groups the projection along `dimension` and returns per-group stats
/// sorted by descending concentration.
///
/// An empty projection or a zero total notional yields an empty vector
/// with a warning.
#[must_use]
pub fn attribution(projection: &Projection, dimension: GroupBy) -> Vec<GroupStat> {
    if projection.is_empty() {
        return Vec::new();
    }

    let total_notional = projection.total_notional();
    if total_notional <= 0.0 {
        warn!("Zero total notional, skipping attribution");
        return Vec::new();
    }

    let mut groups: BTreeMap<String, (usize, f64, f64)> = BTreeMap::new();
    for row in &projection.rows {
        let entry = groups.entry(dimension.key_of(row)).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += row.notional;
        entry.2 += row.pnl_total;
    }

    let mut stats: Vec<GroupStat> = groups
        .into_iter()
        .map(|(key, (deal_count, notional, pnl_total))| GroupStat {
            key,
            deal_count,
            notional,
            notional_m: notional / 1_000_000.0,
            pnl_total,
            pnl_total_m: pnl_total / 1_000_000.0,
            pnl_mean: pnl_total / deal_count as f64,
            pnl_bps: if notional > 0.0 {
                pnl_total / notional * 10_000.0
            } else {
                0.0
            },
            concentration_pct: notional / total_notional * 100.0,
        })
        .collect();

    // Descending by concentration; BTreeMap iteration already fixed the
    // tie-break order alphabetically.
    stats.sort_by(|a, b| {
        b.concentration_pct
            .partial_cmp(&a.concentration_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}
