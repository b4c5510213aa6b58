//! Error types for market snapshot construction.
//!
//! Lookups never fail (see [`crate::snapshot`]); only building a snapshot
//! from raw data can reject bad inputs.

use thiserror::Error;

/// Result type for market data operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors that can occur constructing a market snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// A curve was supplied with no points.
    #[error("OIS curve for {currency} has no points")]
    EmptyCurve {
        /// The currency of the empty curve.
        currency: String,
    },

    /// A rate or tenor was not a finite number.
    #[error("Non-finite value in {context}: {value}")]
    NonFiniteValue {
        /// Where the value was found.
        context: String,
        /// String rendering of the offending value.
        value: String,
    },

    /// An FX spot was zero or negative.
    #[error("Invalid FX spot for {pair}: {rate}")]
    InvalidFxSpot {
        /// The currency pair.
        pair: String,
        /// The invalid rate.
        rate: f64,
    },
}

impl MarketError {
    /// Create an empty curve error.
    #[must_use]
    pub fn empty_curve(currency: impl Into<String>) -> Self {
        Self::EmptyCurve {
            currency: currency.into(),
        }
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(context: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteValue {
            context: context.into(),
            value: value.to_string(),
        }
    }
}
