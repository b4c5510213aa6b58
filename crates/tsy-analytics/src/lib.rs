//! # Tsy Analytics
//!
//! Portfolio projection and descriptive analytics for the Tsy treasury
//! analytics library.
//!
//! The [`Projection`] is the pivot of the whole analytics side: it
//! re-expresses each portfolio PnL row with a tenor bucket, a size
//! category, urgency flags and a base/quote currency split. Risk
//! engines consume the projection, never raw deals, so every layer
//! classifies positions identically.
//!
//! On top of the projection:
//!
//! - [`attribution`] — concentration and PnL attribution along a
//!   grouping dimension (currency, instrument, tenor, trader)
//! - [`time_profile`] — maturity roll-off in day-count buckets
//! - [`PortfolioMetrics`] — headline totals, bps, and urgency counts

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod attribution;
pub mod buckets;
pub mod metrics;
pub mod profile;
pub mod projection;

pub use attribution::{attribution, GroupBy, GroupStat};
pub use buckets::{SizeCategory, TenorBucket};
pub use metrics::PortfolioMetrics;
pub use profile::{time_profile, ProfileBucket};
pub use projection::{Projection, ProjectionRow, UNKNOWN_TRADER};
