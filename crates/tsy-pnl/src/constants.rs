//! Model constants for the PnL decomposition.
//!
//! These are explicit approximations, not calibrated parameters. Do not
//! adjust them without product sign-off; every formula that uses one
//! references it by name so a recalibration is a one-line change.

/// Duration proxy: fraction of time-to-maturity used as duration in the
/// MTM component.
pub const DURATION_PROXY_FACTOR: f64 = 0.8;

/// Fixed sensitivity applied to the curve shift in the rate component.
pub const RATE_SENSITIVITY: f64 = 0.5;

/// Cap on the liquidity spread, 10bp.
pub const LIQUIDITY_SPREAD_CAP: f64 = 0.0010;

/// Notional at which the liquidity size factor saturates at 1.0.
pub const LIQUIDITY_SIZE_SCALE: f64 = 100_000_000.0;

/// OIS rate used when resolution fails entirely (override unset and the
/// snapshot lookup produced a non-finite value).
pub const FALLBACK_OIS_RATE_NOW: f64 = 0.02;
