//! PnL marked against a persisted pricing run.
//!
//! Glue only: fetch the run, take its stored price as the mark, run FIFO,
//! mark the open lots. Nothing is priced or persisted here.

use serde::{Deserialize, Serialize};

use crate::error::{self, PricerError};
use crate::portfolio::fifo::{apply_trades_fifo, unrealized_pnl_from_lots};
use crate::portfolio::models::{RealizedPnl, Trade, UnrealizedPnl};
use crate::store::{PricingRun, RunLookup};
use crate::types::{InstrumentId, RunId};

/// Realized and unrealized PnL for one instrument at one mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlSummary {
    pub instrument_id: InstrumentId,
    pub mark_run_id: RunId,
    pub mark_price: f64,
    pub realized: RealizedPnl,
    pub unrealized: UnrealizedPnl,
    /// `realized.realized + unrealized.unrealized`.
    pub net: f64,
}

/// The mark carried by a run: its one stored option price.
fn mark_price(run: &PricingRun) -> f64 {
    run.outputs.price
}

/// Compute FIFO PnL using a persisted pricing run as the mark.
///
/// # Errors
/// - [`PricerError::RunNotFound`] if `mark_run_id` is not stored
/// - anything [`apply_trades_fifo`] or [`unrealized_pnl_from_lots`] returns,
///   including mixed-instrument and short-sell errors, and
///   [`PricerError::InvalidInput`] when the batch closes every lot
/// - lookup failures from `lookup`
pub fn compute_pnl_with_mark_run<L>(
    lookup: &L,
    mark_run_id: &RunId,
    trades: &[Trade],
) -> error::Result<PnlSummary>
where
    L: RunLookup + ?Sized,
{
    let run = lookup
        .get_pricing_run(mark_run_id)?
        .ok_or_else(|| PricerError::RunNotFound {
            run_id: mark_run_id.to_string(),
        })?;
    let mark = mark_price(&run);

    let (open_lots, realized) = apply_trades_fifo(trades)?;
    let unrealized = unrealized_pnl_from_lots(&open_lots, mark)?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        instrument = %realized.instrument_id,
        mark_run_id = %mark_run_id,
        mark,
        realized = realized.realized,
        unrealized = unrealized.unrealized,
        "PnL marked to run"
    );

    let net = realized.realized + unrealized.unrealized;
    Ok(PnlSummary {
        instrument_id: realized.instrument_id.clone(),
        mark_run_id: mark_run_id.clone(),
        mark_price: mark,
        realized,
        unrealized,
        net,
    })
}
