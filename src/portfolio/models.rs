//! Trade, lot and PnL value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{InstrumentId, Side};

/// A fill-level trade event.
///
/// `qty` is always positive; `side` carries the direction. `price` is quote
/// currency per unit and `fees` are quote currency charged on the fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub instrument_id: InstrumentId,
    pub ts_utc: DateTime<Utc>,
    pub side: Side,
    pub qty: f64,
    pub price: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub trade_id: Option<String>,
}

impl Trade {
    /// A fee-free trade with no venue or trade id.
    pub fn new(
        instrument_id: impl Into<InstrumentId>,
        ts_utc: DateTime<Utc>,
        side: Side,
        qty: f64,
        price: f64,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            ts_utc,
            side,
            qty,
            price,
            fees: 0.0,
            venue: None,
            trade_id: None,
        }
    }

    /// Shorthand for a [`Side::Buy`] trade.
    pub fn buy(
        instrument_id: impl Into<InstrumentId>,
        ts_utc: DateTime<Utc>,
        qty: f64,
        price: f64,
    ) -> Self {
        Self::new(instrument_id, ts_utc, Side::Buy, qty, price)
    }

    /// Shorthand for a [`Side::Sell`] trade.
    pub fn sell(
        instrument_id: impl Into<InstrumentId>,
        ts_utc: DateTime<Utc>,
        qty: f64,
        price: f64,
    ) -> Self {
        Self::new(instrument_id, ts_utc, Side::Sell, qty, price)
    }

    /// Set the total fees charged on this trade.
    pub fn with_fees(mut self, fees: f64) -> Self {
        self.fees = fees;
        self
    }

    /// Record the execution venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Attach the external trade id, carried onto any lot this trade opens.
    pub fn with_trade_id(mut self, trade_id: impl Into<String>) -> Self {
        self.trade_id = Some(trade_id.into());
        self
    }
}

/// An open FIFO lot.
///
/// Created by a BUY and shrunk or removed by later SELLs. `cost_per_unit`
/// excludes fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub instrument_id: InstrumentId,
    /// Timestamp of the BUY that opened the lot.
    pub ts_utc: DateTime<Utc>,
    pub qty: f64,
    pub cost_per_unit: f64,
    #[serde(default)]
    pub source_trade_id: Option<String>,
}

impl Lot {
    /// Open a lot from a BUY trade.
    pub(crate) fn open(trade: &Trade) -> Self {
        Self {
            instrument_id: trade.instrument_id.clone(),
            ts_utc: trade.ts_utc,
            qty: trade.qty,
            cost_per_unit: trade.price,
            source_trade_id: trade.trade_id.clone(),
        }
    }

    /// The same lot with a different remaining quantity.
    ///
    /// Origin timestamp, cost and source trade are carried over.
    pub fn with_qty(&self, qty: f64) -> Self {
        Self {
            qty,
            ..self.clone()
        }
    }
}

/// Realized PnL for one batch of trades, net of every fee in the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizedPnl {
    pub instrument_id: InstrumentId,
    pub realized: f64,
    /// Sum of fees over all trades in the batch.
    pub fees: f64,
}

/// Mark-to-market PnL of the open lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrealizedPnl {
    pub instrument_id: InstrumentId,
    pub unrealized: f64,
    pub mark_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lot_with_qty_keeps_origin() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let trade = Trade::buy("AAPL", ts, 2.0, 105.0).with_trade_id("t-1");
        let lot = Lot::open(&trade);
        let smaller = lot.with_qty(0.5);
        assert_eq!(smaller.qty, 0.5);
        assert_eq!(smaller.ts_utc, ts);
        assert_eq!(smaller.cost_per_unit, 105.0);
        assert_eq!(smaller.source_trade_id.as_deref(), Some("t-1"));
        assert_eq!(lot.qty, 2.0);
    }

    #[test]
    fn trade_deserializes_with_defaults() {
        let json = r#"{
            "instrument_id": "AAPL",
            "ts_utc": "2026-01-01T00:00:00Z",
            "side": "BUY",
            "qty": 1.0,
            "price": 100.0
        }"#;
        let t: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(t.fees, 0.0);
        assert!(t.venue.is_none() && t.trade_id.is_none());
        assert_eq!(t.side, Side::Buy);
    }
}
