//! Core data types for the treasury engine.

mod deal;
mod pnl;

pub use deal::{Deal, DealBuilder, Direction, ProductKind};
pub use pnl::{DealPnL, PnLConfig, PNL_SUM_TOLERANCE};
