//! FIFO inventory accounting.
//!
//! BUYs append lots at the tail; SELLs consume from the head, oldest first.
//! Each unit sold realizes `(sell_price − lot cost)`. Fees from every trade,
//! either side, are subtracted from the realized total at the end.
//!
//! Both functions are stateless: one call handles one closed batch of trades
//! for a single instrument, and the lot consumption order is part of the
//! result, so a batch is always processed sequentially.

use std::collections::VecDeque;

use crate::error::{self, PricerError};
use crate::portfolio::models::{Lot, RealizedPnl, Trade, UnrealizedPnl};
use crate::types::{InstrumentId, Side};
use crate::validate::{validate_non_negative, validate_positive};

/// Apply a batch of trades under FIFO and return `(open_lots, realized)`.
///
/// Trades are applied in slice order; timestamps are not consulted. Open lots
/// come back oldest first and may be empty.
///
/// # Errors
/// - [`PricerError::InvalidInput`] if `trades` is empty, mixes instruments,
///   or any trade has `qty <= 0`, `price < 0` or `fees < 0` (or a non-finite
///   value). Every trade is checked before any is applied.
/// - [`PricerError::InsufficientInventory`] if a SELL exceeds the open
///   quantity.
///
/// # Examples
/// ```
/// use bsm_pricer::portfolio::{apply_trades_fifo, Trade};
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let (lots, pnl) = apply_trades_fifo(&[
///     Trade::buy("AAPL", ts, 1.0, 100.0),
///     Trade::sell("AAPL", ts, 1.0, 110.0),
/// ])?;
/// assert!(lots.is_empty());
/// assert_eq!(pnl.realized, 10.0);
/// # Ok::<(), bsm_pricer::PricerError>(())
/// ```
pub fn apply_trades_fifo(trades: &[Trade]) -> error::Result<(Vec<Lot>, RealizedPnl)> {
    let instrument = single_instrument(trades.iter().map(|t| &t.instrument_id), "trades")?;
    for trade in trades {
        validate_positive(trade.qty, "trade.qty")?;
        validate_non_negative(trade.price, "trade.price")?;
        validate_non_negative(trade.fees, "trade.fees")?;
    }

    #[cfg(feature = "logging")]
    tracing::debug!(%instrument, n_trades = trades.len(), "FIFO batch started");

    let mut lots: VecDeque<Lot> = VecDeque::new();
    let mut realized = 0.0;
    let mut fees = 0.0;

    for trade in trades {
        fees += trade.fees;

        match trade.side {
            Side::Buy => lots.push_back(Lot::open(trade)),
            Side::Sell => realized += consume_fifo(&mut lots, trade)?,
        }
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        %instrument,
        open_lots = lots.len(),
        gross = realized,
        fees,
        "FIFO batch complete"
    );

    Ok((
        lots.into(),
        RealizedPnl {
            instrument_id: instrument.clone(),
            realized: realized - fees,
            fees,
        },
    ))
}

/// Consume `sell.qty` from the head of `lots` and return the gross realized PnL.
fn consume_fifo(lots: &mut VecDeque<Lot>, sell: &Trade) -> error::Result<f64> {
    let available: f64 = lots.iter().map(|l| l.qty).sum();
    let mut remaining = sell.qty;
    let mut realized = 0.0;

    while remaining > 0.0 {
        let Some(head) = lots.pop_front() else {
            return Err(PricerError::InsufficientInventory {
                instrument: sell.instrument_id.to_string(),
                requested: sell.qty,
                available,
            });
        };

        let take = head.qty.min(remaining);
        realized += (sell.price - head.cost_per_unit) * take;
        remaining -= take;

        let left = head.qty - take;
        if left > 0.0 {
            #[cfg(feature = "logging")]
            tracing::trace!(cost = head.cost_per_unit, take, left, "partial lot fill");
            lots.push_front(head.with_qty(left));
        }
    }

    Ok(realized)
}

/// Mark open lots to `mark_price`: Σ (mark − cost) × qty.
///
/// # Errors
/// Returns [`PricerError::InvalidInput`] if `lots` is empty, mixes
/// instruments, any lot has `qty <= 0` or `cost_per_unit < 0`, or
/// `mark_price < 0` (non-finite values are rejected too).
pub fn unrealized_pnl_from_lots(lots: &[Lot], mark_price: f64) -> error::Result<UnrealizedPnl> {
    let instrument = single_instrument(lots.iter().map(|l| &l.instrument_id), "lots")?;
    for lot in lots {
        validate_positive(lot.qty, "lot.qty")?;
        validate_non_negative(lot.cost_per_unit, "lot.cost_per_unit")?;
    }
    validate_non_negative(mark_price, "mark_price")?;

    let unrealized: f64 = lots
        .iter()
        .map(|lot| (mark_price - lot.cost_per_unit) * lot.qty)
        .sum();

    Ok(UnrealizedPnl {
        instrument_id: instrument.clone(),
        unrealized,
        mark_price,
    })
}

/// The one instrument shared by every item, or an error if there are none or several.
fn single_instrument<'a, I>(mut ids: I, what: &str) -> error::Result<&'a InstrumentId>
where
    I: Iterator<Item = &'a InstrumentId>,
{
    let first = ids.next().ok_or_else(|| PricerError::InvalidInput {
        message: format!("{what} is empty"),
    })?;
    if let Some(other) = ids.find(|id| *id != first) {
        return Err(PricerError::InvalidInput {
            message: format!("{what} must share one instrument, found {first} and {other}"),
        });
    }
    Ok(first)
}
