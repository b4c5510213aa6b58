//! Maturity time profile: positions rolled up into day-count buckets.

use crate::projection::Projection;
use serde::{Deserialize, Serialize};

/// The fixed day-count buckets of the profile.
const TIME_BUCKETS: &[(i64, i64, &str)] = &[
    (0, 7, "0-7d"),
    (8, 30, "1M"),
    (31, 90, "3M"),
    (91, 180, "6M"),
    (181, 365, "1Y"),
    (366, 730, "2Y"),
    (731, 1825, "5Y"),
    (1826, i64::MAX, "5Y+"),
];

/// Aggregates for one day-count bucket. Buckets with no positions are
/// omitted from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileBucket {
    /// Bucket label.
    pub bucket: String,
    /// Inclusive lower bound in days.
    pub min_days: i64,
    /// Inclusive upper bound in days (`i64::MAX` for the open bucket).
    pub max_days: i64,
    /// Number of positions maturing in the bucket.
    pub deal_count: usize,
    /// Summed notional.
    pub notional: f64,
    /// Summed notional in millions.
    pub notional_m: f64,
    /// Summed total PnL.
    pub pnl_total: f64,
    /// Mean client rate across positions.
    pub avg_rate: f64,
    /// Distinct instrument kinds present, sorted.
    pub instruments: Vec<String>,
    /// Share of profiled notional, percent.
    pub concentration_pct: f64,
}

/// Builds the maturity profile of a projection.
///
/// Expired positions (negative days to maturity) fall outside every
/// bucket and are excluded. Returns an empty vector for an empty
/// projection.
#[must_use]
pub fn time_profile(projection: &Projection) -> Vec<ProfileBucket> {
    if projection.is_empty() {
        return Vec::new();
    }

    let mut buckets = Vec::new();
    for &(min_days, max_days, label) in TIME_BUCKETS {
        let rows: Vec<_> = projection
            .rows
            .iter()
            .filter(|r| r.days_to_maturity >= min_days && r.days_to_maturity <= max_days)
            .collect();
        if rows.is_empty() {
            continue;
        }

        let notional: f64 = rows.iter().map(|r| r.notional).sum();
        let mut instruments: Vec<String> = rows.iter().map(|r| r.instrument.clone()).collect();
        instruments.sort();
        instruments.dedup();

        buckets.push(ProfileBucket {
            bucket: label.to_string(),
            min_days,
            max_days,
            deal_count: rows.len(),
            notional,
            notional_m: notional / 1_000_000.0,
            pnl_total: rows.iter().map(|r| r.pnl_total).sum(),
            avg_rate: rows.iter().map(|r| r.client_rate).sum::<f64>() / rows.len() as f64,
            instruments,
            concentration_pct: 0.0,
        });
    }

    let profiled_notional: f64 = buckets.iter().map(|b| b.notional).sum();
    if profiled_notional > 0.0 {
        for bucket in &mut buckets {
            bucket.concentration_pct = bucket.notional / profiled_notional * 100.0;
        }
    }

    buckets
}
