//! The read-only market snapshot and its fallback-flagged lookups.
//!
//! Lookups deliberately never fail: a missing curve, pair, or index
//! degrades to a documented fallback value with a warning, favouring
//! availability over fidelity. The fallback flag travels with the value
//! so callers can alert without changing the non-throwing contract.

use crate::curve::Curve;
use crate::error::{MarketError, MarketResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback OIS rate when a currency has no curve.
pub const FALLBACK_OIS_RATE: f64 = 0.05;

/// Fallback FX spot when a pair (and its inverse) is unknown.
pub const FALLBACK_FX_SPOT: f64 = 1.0;

/// Fallback fixing when a float index is unknown.
pub const FALLBACK_INDEX_RATE: f64 = 0.03;

/// A market value together with whether it came from a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    /// The resolved value.
    pub value: f64,
    /// True when the value is a documented fallback, not market data.
    pub was_fallback: bool,
}

impl Resolved {
    fn market(value: f64) -> Self {
        Self {
            value,
            was_fallback: false,
        }
    }

    fn fallback(value: f64) -> Self {
        Self {
            value,
            was_fallback: true,
        }
    }
}

/// OIS curves per currency, FX spots per pair, and float index fixings.
///
/// Read-only once built; one snapshot may be shared across every deal
/// valued in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    ois_curves: BTreeMap<String, Curve>,
    fx_spots: BTreeMap<String, f64>,
    float_indices: BTreeMap<String, f64>,
}

impl MarketSnapshot {
    /// Starts building a snapshot.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// OIS rate for `currency` at `maturity_years`.
    ///
    /// Missing currency degrades to [`FALLBACK_OIS_RATE`] with a warning;
    /// otherwise the curve interpolates linearly with flat extrapolation.
    #[must_use]
    pub fn ois_rate(&self, currency: &str, maturity_years: f64) -> Resolved {
        match self.ois_curves.get(currency) {
            Some(curve) => {
                let rate = curve.rate_at(maturity_years);
                debug!("OIS {currency} {maturity_years}Y = {rate:.4}");
                Resolved::market(rate)
            }
            None => {
                warn!("No OIS curve for {currency}, using fallback {FALLBACK_OIS_RATE}");
                Resolved::fallback(FALLBACK_OIS_RATE)
            }
        }
    }

    /// FX spot for `pair`, trying the inverted pair (reciprocal) before
    /// degrading to [`FALLBACK_FX_SPOT`].
    #[must_use]
    pub fn fx_spot(&self, pair: &str) -> Resolved {
        if let Some(&rate) = self.fx_spots.get(pair) {
            return Resolved::market(rate);
        }

        if let Some((base, quote)) = pair.split_once('/') {
            let inverted = format!("{quote}/{base}");
            if let Some(&rate) = self.fx_spots.get(&inverted) {
                // Spots are validated strictly positive at build time.
                return Resolved::market(1.0 / rate);
            }
        }

        warn!("No FX spot for {pair}, using fallback {FALLBACK_FX_SPOT}");
        Resolved::fallback(FALLBACK_FX_SPOT)
    }

    /// Fixing for a float index, degrading to [`FALLBACK_INDEX_RATE`].
    #[must_use]
    pub fn float_index(&self, name: &str) -> Resolved {
        match self.float_indices.get(name) {
            Some(&rate) => Resolved::market(rate),
            None => {
                warn!("No fixing for index {name}, using fallback {FALLBACK_INDEX_RATE}");
                Resolved::fallback(FALLBACK_INDEX_RATE)
            }
        }
    }

    /// The currencies with a quoted OIS curve.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.ois_curves.keys().map(String::as_str)
    }

    /// A fixed snapshot for tests and demos: USD/EUR/JPY/GBP/CHF OIS
    /// curves, the G10 spot crosses, and the usual 3M fixings.
    #[must_use]
    pub fn mock() -> Self {
        Self::builder()
            .curve("USD", &[(0.25, 0.052), (0.5, 0.051), (1.0, 0.050), (2.0, 0.047), (5.0, 0.043), (10.0, 0.040)])
            .curve("EUR", &[(0.25, 0.036), (0.5, 0.034), (1.0, 0.033), (2.0, 0.031), (5.0, 0.028), (10.0, 0.026)])
            .curve("JPY", &[(0.25, 0.003), (0.5, 0.004), (1.0, 0.005), (2.0, 0.007), (5.0, 0.009), (10.0, 0.010)])
            .curve("GBP", &[(0.25, 0.049), (0.5, 0.048), (1.0, 0.047), (2.0, 0.044), (5.0, 0.041), (10.0, 0.038)])
            .curve("CHF", &[(0.25, 0.018), (0.5, 0.017), (1.0, 0.016), (2.0, 0.015), (5.0, 0.013), (10.0, 0.012)])
            .fx_spot("EUR/USD", 1.0850)
            .fx_spot("USD/JPY", 148.50)
            .fx_spot("GBP/USD", 1.2650)
            .fx_spot("USD/CHF", 0.8750)
            .fx_spot("AUD/USD", 0.6580)
            .fx_spot("USD/CAD", 1.3520)
            .fx_spot("EUR/GBP", 0.8580)
            .fx_spot("EUR/JPY", 161.20)
            .float_index("EURIBOR_3M", 0.033)
            .float_index("SOFR_3M", 0.052)
            .float_index("CHF_SARON_3M", 0.016)
            .float_index("JPY_TONA_3M", 0.005)
            .float_index("GBP_SONIA_3M", 0.047)
            .build()
            .expect("mock snapshot is well-formed")
    }
}

/// Builder for [`MarketSnapshot`] with validation at `build()`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    curves: Vec<(String, Vec<(f64, f64)>)>,
    fx_spots: Vec<(String, f64)>,
    float_indices: Vec<(String, f64)>,
}

impl SnapshotBuilder {
    /// Adds an OIS curve from (tenor, rate) pairs.
    #[must_use]
    pub fn curve(mut self, currency: impl Into<String>, points: &[(f64, f64)]) -> Self {
        self.curves.push((currency.into(), points.to_vec()));
        self
    }

    /// Adds an FX spot quote.
    #[must_use]
    pub fn fx_spot(mut self, pair: impl Into<String>, rate: f64) -> Self {
        self.fx_spots.push((pair.into(), rate));
        self
    }

    /// Adds a float index fixing.
    #[must_use]
    pub fn float_index(mut self, name: impl Into<String>, rate: f64) -> Self {
        self.float_indices.push((name.into(), rate));
        self
    }

    /// Validates and builds the snapshot.
    ///
    /// # Errors
    ///
    /// Rejects empty curves, non-finite values, and non-positive FX spots.
    pub fn build(self) -> MarketResult<MarketSnapshot> {
        let mut ois_curves = BTreeMap::new();
        for (currency, points) in self.curves {
            let curve = Curve::new(&currency, &points)?;
            ois_curves.insert(currency, curve);
        }

        let mut fx_spots = BTreeMap::new();
        for (pair, rate) in self.fx_spots {
            if !rate.is_finite() {
                return Err(MarketError::non_finite(format!("FX spot {pair}"), rate));
            }
            if rate <= 0.0 {
                return Err(MarketError::InvalidFxSpot { pair, rate });
            }
            fx_spots.insert(pair, rate);
        }

        let mut float_indices = BTreeMap::new();
        for (name, rate) in self.float_indices {
            if !rate.is_finite() {
                return Err(MarketError::non_finite(format!("index {name}"), rate));
            }
            float_indices.insert(name, rate);
        }

        Ok(MarketSnapshot {
            ois_curves,
            fx_spots,
            float_indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ois_rate_interpolated() {
        let snapshot = MarketSnapshot::builder()
            .curve("USD", &[(1.0, 0.05), (5.0, 0.03)])
            .build()
            .unwrap();

        let r = snapshot.ois_rate("USD", 3.0);
        assert_relative_eq!(r.value, 0.04, epsilon = 1e-12);
        assert!(!r.was_fallback);
    }

    #[test]
    fn test_missing_currency_falls_back() {
        let snapshot = MarketSnapshot::builder()
            .curve("USD", &[(1.0, 0.05)])
            .build()
            .unwrap();

        let r = snapshot.ois_rate("SEK", 2.0);
        assert_eq!(r.value, FALLBACK_OIS_RATE);
        assert!(r.was_fallback);
    }

    #[test]
    fn test_fx_spot_direct_and_inverted() {
        let snapshot = MarketSnapshot::mock();

        let direct = snapshot.fx_spot("EUR/USD");
        assert_relative_eq!(direct.value, 1.0850, epsilon = 1e-12);
        assert!(!direct.was_fallback);

        let inverted = snapshot.fx_spot("USD/EUR");
        assert_relative_eq!(inverted.value, 1.0 / 1.0850, epsilon = 1e-12);
        assert!(!inverted.was_fallback);
    }

    #[test]
    fn test_fx_spot_unknown_falls_back() {
        let snapshot = MarketSnapshot::mock();
        let r = snapshot.fx_spot("NOK/SEK");
        assert_eq!(r.value, FALLBACK_FX_SPOT);
        assert!(r.was_fallback);
    }

    #[test]
    fn test_float_index_lookup() {
        let snapshot = MarketSnapshot::mock();
        assert_relative_eq!(snapshot.float_index("SOFR_3M").value, 0.052, epsilon = 1e-12);

        let miss = snapshot.float_index("WIBOR_3M");
        assert_eq!(miss.value, FALLBACK_INDEX_RATE);
        assert!(miss.was_fallback);
    }

    #[test]
    fn test_invalid_fx_rejected() {
        let err = MarketSnapshot::builder()
            .fx_spot("EUR/USD", 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidFxSpot { .. }));
    }

    #[test]
    fn test_mock_has_all_currencies() {
        let snapshot = MarketSnapshot::mock();
        let currencies: Vec<_> = snapshot.currencies().collect();
        for ccy in ["CHF", "EUR", "GBP", "JPY", "USD"] {
            assert!(currencies.contains(&ccy));
        }
    }
}
