//! Volatility proxies and the hand-built correlation structure for
//! currency-pair exposures.
//!
//! Rules key off currency membership of the pair's legs, so "GBP/USD"
//! matches the GBP bloc while a hypothetical "XGB/PSD" does not. Rule
//! precedence is fixed: for volatility JPY wins over the high-beta
//! bloc; for correlation the USD rule wins over the European bloc.

use nalgebra::DMatrix;

/// Base FX volatility proxy.
pub const BASE_FX_VOL: f64 = 0.10;

/// Volatility proxy for pairs with a JPY leg.
pub const JPY_FX_VOL: f64 = 0.12;

/// Volatility proxy for pairs with a GBP, AUD or CAD leg.
pub const HIGH_BETA_FX_VOL: f64 = 0.15;

/// Off-diagonal base correlation.
pub const BASE_CORRELATION: f64 = 0.30;

/// Correlation between two pairs that both carry a USD leg.
pub const USD_CORRELATION: f64 = 0.60;

/// Correlation between two pairs drawn from the European bloc
/// (EUR, GBP, CHF).
pub const EUROPEAN_CORRELATION: f64 = 0.50;

const HIGH_BETA: [&str; 3] = ["GBP", "AUD", "CAD"];
const EUROPEAN: [&str; 3] = ["EUR", "GBP", "CHF"];

/// The currency legs of a pair string: both sides of "EUR/USD", or the
/// single code for a one-currency position.
#[must_use]
pub fn pair_legs(pair: &str) -> Vec<&str> {
    match pair.split_once('/') {
        Some((base, quote)) => vec![base, quote],
        None => vec![pair],
    }
}

fn has_leg(pair: &str, currency: &str) -> bool {
    pair_legs(pair).contains(&currency)
}

fn has_any_leg(pair: &str, currencies: &[&str]) -> bool {
    pair_legs(pair)
        .iter()
        .any(|leg| currencies.contains(leg))
}

/// Volatility proxy for one pair.
#[must_use]
pub fn pair_volatility(pair: &str) -> f64 {
    if has_leg(pair, "JPY") {
        JPY_FX_VOL
    } else if has_any_leg(pair, &HIGH_BETA) {
        HIGH_BETA_FX_VOL
    } else {
        BASE_FX_VOL
    }
}

/// Builds the pairwise correlation matrix for the given pairs.
///
/// Unit diagonal; [`USD_CORRELATION`] when both pairs carry USD,
/// [`EUROPEAN_CORRELATION`] when both carry a European-bloc leg,
/// [`BASE_CORRELATION`] otherwise.
#[must_use]
pub fn correlation_matrix(pairs: &[String]) -> DMatrix<f64> {
    let n = pairs.len();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            1.0
        } else if has_leg(&pairs[i], "USD") && has_leg(&pairs[j], "USD") {
            USD_CORRELATION
        } else if has_any_leg(&pairs[i], &EUROPEAN) && has_any_leg(&pairs[j], &EUROPEAN) {
            EUROPEAN_CORRELATION
        } else {
            BASE_CORRELATION
        }
    })
}

/// Covariance matrix: element-wise product of the volatility outer
/// product with the correlation matrix.
#[must_use]
pub fn covariance_matrix(pairs: &[String]) -> DMatrix<f64> {
    let vols: Vec<f64> = pairs.iter().map(|p| pair_volatility(p)).collect();
    let corr = correlation_matrix(pairs);
    DMatrix::from_fn(pairs.len(), pairs.len(), |i, j| {
        vols[i] * vols[j] * corr[(i, j)]
    })
}
