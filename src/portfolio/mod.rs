//! Single-instrument position accounting.
//!
//! - [`apply_trades_fifo`] — FIFO lot inventory and realized PnL
//! - [`unrealized_pnl_from_lots`] — mark open lots to a price
//! - [`compute_pnl_with_mark_run`] — both, marked to a persisted pricing run

pub mod fifo;
pub mod mark;
pub mod models;

pub use fifo::{apply_trades_fifo, unrealized_pnl_from_lots};
pub use mark::{PnlSummary, compute_pnl_with_mark_run};
pub use models::{Lot, RealizedPnl, Trade, UnrealizedPnl};
