//! # Tsy Market
//!
//! Market snapshot store for the Tsy treasury analytics library.
//!
//! A [`MarketSnapshot`] holds OIS curves per currency, FX spot quotes,
//! and float index fixings. It is validated at construction and
//! read-only afterwards, so one snapshot can be shared across every
//! deal valued in a run.
//!
//! ## Lookup contract
//!
//! Lookups never raise. A missing curve, pair, or index resolves to a
//! documented fallback with [`Resolved::was_fallback`] set, and a
//! warning is logged. Callers that need to alert on degraded data check
//! the flag; callers that just need a number use the value.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod curve;
pub mod error;
pub mod snapshot;

pub use curve::{Curve, CurvePoint};
pub use error::{MarketError, MarketResult};
pub use snapshot::{
    MarketSnapshot, Resolved, SnapshotBuilder, FALLBACK_FX_SPOT, FALLBACK_INDEX_RATE,
    FALLBACK_OIS_RATE,
};
