//! Risk engine errors.

use thiserror::Error;

/// Errors raised while preparing or running a risk calculation.
///
/// These never escape the public simulation entry points, which degrade
/// to an empty result with a logged error instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// The covariance matrix could not be factorized.
    #[error("covariance matrix of size {size} is not positive definite")]
    CovarianceNotPositiveDefinite {
        /// Dimension of the matrix.
        size: usize,
    },

    /// A simulation parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl RiskError {
    /// Builds an [`RiskError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for risk results.
pub type RiskResult<T> = Result<T, RiskError>;
