//! Tenor and size classification.

use serde::{Deserialize, Serialize};

/// Standard maturity buckets, classified by upper bound on the residual
/// maturity in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenorBucket {
    /// Matured (non-positive residual maturity).
    Expired,
    /// Up to one month.
    M1,
    /// Up to three months.
    M3,
    /// Up to six months.
    M6,
    /// Up to twelve months.
    M12,
    /// Up to two years.
    Y2,
    /// Up to five years.
    Y5,
    /// Up to ten years.
    Y10,
    /// Beyond ten years.
    Y10Plus,
}

impl TenorBucket {
    /// Classifies a residual maturity in years.
    ///
    /// Non-positive or non-finite input maps to [`TenorBucket::Expired`].
    #[must_use]
    pub fn classify(time_to_maturity_years: f64) -> Self {
        if !time_to_maturity_years.is_finite() || time_to_maturity_years <= 0.0 {
            return Self::Expired;
        }
        match time_to_maturity_years {
            y if y <= 1.0 / 12.0 => Self::M1,
            y if y <= 0.25 => Self::M3,
            y if y <= 0.5 => Self::M6,
            y if y <= 1.0 => Self::M12,
            y if y <= 2.0 => Self::Y2,
            y if y <= 5.0 => Self::Y5,
            y if y <= 10.0 => Self::Y10,
            _ => Self::Y10Plus,
        }
    }

    /// Display label, e.g. "3M" or "10Y+".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::M1 => "1M",
            Self::M3 => "3M",
            Self::M6 => "6M",
            Self::M12 => "12M",
            Self::Y2 => "2Y",
            Self::Y5 => "5Y",
            Self::Y10 => "10Y",
            Self::Y10Plus => "10Y+",
        }
    }
}

impl std::fmt::Display for TenorBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Position size categories from fixed notional breakpoints (millions):
/// 0-10, 10-50, 50-100, 100-500, 500+.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeCategory {
    /// Up to 10M.
    Small,
    /// 10M to 50M.
    Medium,
    /// 50M to 100M.
    Large,
    /// 100M to 500M.
    XLarge,
    /// Above 500M.
    Jumbo,
}

impl SizeCategory {
    /// Classifies a notional expressed in millions.
    #[must_use]
    pub fn classify(notional_m: f64) -> Self {
        match notional_m {
            n if n <= 10.0 => Self::Small,
            n if n <= 50.0 => Self::Medium,
            n if n <= 100.0 => Self::Large,
            n if n <= 500.0 => Self::XLarge,
            _ => Self::Jumbo,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::XLarge => "XLarge",
            Self::Jumbo => "Jumbo",
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
