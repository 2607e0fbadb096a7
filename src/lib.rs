//! # bsm-pricer
//!
//! Validated Black-Scholes-Merton pricing for European options, value
//! surfaces over (volatility, spot) grids, and FIFO trade accounting marked
//! against persisted pricing runs.
//!
//! ## Architecture
//!
//! - **`pricing`** — closed-form kernel and the validated pricing policy
//! - **`surface`** — call/put value matrices over a volatility × spot grid
//! - **`portfolio`** — FIFO lots, realized and unrealized PnL
//! - **`store`** — run/surface records and the repository seam
//! - **`service`** — compute-then-persist orchestration and replay
//! - **`config`** — TOML defaults for inputs and grids
//!
//! ## Design
//!
//! - **Bare `f64` inputs, validated once.** [`price_checked`] applies the
//!   whole input policy (finite, positive spot and strike, non-negative vol
//!   and expiry) and the `T = 0` / `sigma = 0` branches. The raw kernel in
//!   [`pricing::black_scholes`] assumes valid inputs.
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **Pluggable engine.** Surfaces and the service take any
//!   [`PricingEngine`]; closures qualify.
//! - **Thread-safe.** Engines are `Send + Sync`; [`store::MemoryRepository`]
//!   guards its tables with a reader-writer lock.
//! - **Serializable.** Inputs, results, surfaces, trades and stored records
//!   implement Serde `Serialize` / `Deserialize` with the short field names
//!   `S`, `K`, `sigma`, `T`, `r`.
//!
//! ## Quick start
//!
//! ```
//! use bsm_pricer::price_checked;
//!
//! let r = price_checked(100.0, 100.0, 0.2, 1.0, 0.05)?;
//! assert!((r.call - 10.4506).abs() < 1e-4);
//! assert!((r.put - 5.5735).abs() < 1e-4);
//! # Ok::<(), bsm_pricer::PricerError>(())
//! ```

pub mod config;
pub mod conventions;
pub mod error;
pub mod portfolio;
pub mod pricing;
pub mod service;
pub mod store;
pub mod surface;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{PricerError, Result};
#[doc(inline)]
pub use portfolio::{apply_trades_fifo, compute_pnl_with_mark_run, unrealized_pnl_from_lots};
#[doc(inline)]
pub use pricing::{CheckedEngine, PricingEngine, PricingParameters, PricingResult, price_checked};
#[doc(inline)]
pub use service::PricingService;
#[doc(inline)]
pub use surface::{ValueSurface, value_surface};
#[doc(inline)]
pub use types::{InstrumentId, OptionType, RunId, Side, SurfaceId};
