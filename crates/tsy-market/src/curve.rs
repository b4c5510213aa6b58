//! A single zero/OIS curve with linear interpolation.

use crate::error::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};

/// One point on a curve: tenor in years and the rate at that tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Tenor in years.
    pub tenor: f64,
    /// Zero rate at this tenor, decimal.
    pub rate: f64,
}

/// A non-empty curve, sorted by tenor at construction.
///
/// Interpolation is linear on rates between points; outside the quoted
/// range the curve extrapolates flat from the nearest point. This keeps
/// short-dated and very long-dated lookups stable rather than letting
/// the linear segments run off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<CurvePoint>,
}

impl Curve {
    /// Builds a curve from (tenor, rate) pairs.
    ///
    /// # Errors
    ///
    /// Rejects empty input and any non-finite tenor or rate.
    pub fn new(currency: &str, points: &[(f64, f64)]) -> MarketResult<Self> {
        if points.is_empty() {
            return Err(MarketError::empty_curve(currency));
        }

        let mut pts = Vec::with_capacity(points.len());
        for &(tenor, rate) in points {
            if !tenor.is_finite() {
                return Err(MarketError::non_finite(format!("{currency} curve tenor"), tenor));
            }
            if !rate.is_finite() {
                return Err(MarketError::non_finite(format!("{currency} curve rate"), rate));
            }
            pts.push(CurvePoint { tenor, rate });
        }
        pts.sort_by(|a, b| a.tenor.partial_cmp(&b.tenor).unwrap_or(std::cmp::Ordering::Equal));

        Ok(Self { points: pts })
    }

    /// Rate at `maturity_years`: flat extrapolation outside the quoted
    /// range, linear interpolation between adjacent points.
    #[must_use]
    pub fn rate_at(&self, maturity_years: f64) -> f64 {
        let first = self.points.first().expect("curve is non-empty");
        let last = self.points.last().expect("curve is non-empty");

        if maturity_years <= first.tenor {
            return first.rate;
        }
        if maturity_years >= last.tenor {
            return last.rate;
        }

        for pair in self.points.windows(2) {
            let (p0, p1) = (pair[0], pair[1]);
            if p0.tenor <= maturity_years && maturity_years <= p1.tenor {
                let weight = (maturity_years - p0.tenor) / (p1.tenor - p0.tenor);
                return p0.rate + weight * (p1.rate - p0.rate);
            }
        }

        last.rate
    }

    /// The sorted curve points.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interpolation() {
        let curve = Curve::new("USD", &[(1.0, 0.05), (5.0, 0.03)]).unwrap();
        assert_relative_eq!(curve.rate_at(3.0), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = Curve::new("USD", &[(1.0, 0.05), (5.0, 0.03)]).unwrap();
        assert_relative_eq!(curve.rate_at(0.5), 0.05, epsilon = 1e-12);
        assert_relative_eq!(curve.rate_at(10.0), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_pillar() {
        let curve = Curve::new("USD", &[(0.25, 0.052), (1.0, 0.050), (5.0, 0.043)]).unwrap();
        assert_relative_eq!(curve.rate_at(1.0), 0.050, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_input_sorted() {
        let curve = Curve::new("EUR", &[(5.0, 0.028), (0.25, 0.036), (1.0, 0.033)]).unwrap();
        assert_relative_eq!(curve.rate_at(0.1), 0.036, epsilon = 1e-12);
        assert_relative_eq!(curve.rate_at(20.0), 0.028, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            Curve::new("USD", &[]),
            Err(MarketError::EmptyCurve { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Curve::new("USD", &[(1.0, f64::NAN)]).is_err());
        assert!(Curve::new("USD", &[(f64::INFINITY, 0.05)]).is_err());
    }
}
