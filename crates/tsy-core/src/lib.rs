//! # Tsy Core
//!
//! Core types, validation, and date conventions for the Tsy treasury
//! analytics library.
//!
//! ## Design Philosophy
//!
//! - **Fail-fast construction**: a [`Deal`] is validated once, at build
//!   time, and is immutable afterwards. A malformed deal can never enter
//!   a portfolio.
//! - **Explicit valuation date**: no global clock; every downstream
//!   computation receives its valuation date as a parameter.
//! - **ACT/365 fixed**: the single day-count convention used for accrual
//!   periods and time to maturity.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod dates;
pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Deal, DealBuilder, DealPnL, Direction, PnLConfig, ProductKind, PNL_SUM_TOLERANCE};
