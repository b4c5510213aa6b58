//! # Tsy PnL
//!
//! PnL decomposition engine for the Tsy treasury analytics library.
//!
//! Each deal's forward-looking PnL splits into four additive components:
//!
//! - **accrued** — carry earned on the client/OIS differential to date
//! - **mtm** — valuation change from the curve move since inception
//! - **rate** — directional curve-shift exposure
//! - **liquidity** — unwind cost scaled by size and remaining term
//!
//! `total = accrued + mtm + rate + liquidity` always holds, and an
//! expired deal is all zeros. [`PortfolioTable::compute`] values a whole
//! batch against one shared [`tsy_market::MarketSnapshot`], producing
//! exactly one row per deal in input order.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tsy_core::{Deal, Direction, PnLConfig, ProductKind};
//! use tsy_market::MarketSnapshot;
//! use tsy_pnl::PortfolioTable;
//!
//! let deal = Deal::builder()
//!     .deal_id("D001")
//!     .product(ProductKind::Deposit)
//!     .direction(Direction::Deposit)
//!     .pair_currency("USD")
//!     .amount(10_000_000.0)
//!     .trade_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!     .value_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!     .maturity_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
//!     .client_rate(0.05)
//!     .ois_equivalent_rate(0.048)
//!     .build()
//!     .unwrap();
//!
//! let table = PortfolioTable::compute(
//!     &[deal],
//!     &PnLConfig::default(),
//!     &MarketSnapshot::mock(),
//!     NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
//! );
//! assert_eq!(table.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `parallel` — rayon-based valuation for large batches; row order
//!   still tracks input order.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod constants;
pub mod engine;
pub mod table;

pub use components::{accrued_pnl, liquidity_pnl, mtm_pnl, rate_pnl};
pub use engine::{deal_pnl, resolve_ois_rate};
pub use table::{PortfolioRow, PortfolioTable};
