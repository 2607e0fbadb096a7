//! Error types for the bsm-pricer library.
//!
//! All fallible operations return `Result<T, PricerError>` rather than panicking.
//! Variants map onto the error taxonomy callers react to: bad types, bad
//! values, short sells under FIFO, and missing persisted runs.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, PricerError>;

/// Errors raised by pricing, surface generation, accounting and storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PricerError {
    /// A dynamically supplied parameter is missing or not a number.
    #[error("invalid type: {message}")]
    InvalidType { message: String },

    /// A numeric input violates domain policy (non-finite, out of range,
    /// empty batch, mixed instruments).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A grid axis is empty or not one-dimensional.
    #[error("invalid shape: {message}")]
    InvalidShape { message: String },

    /// A grid axis with more than one element is not strictly increasing.
    #[error("unordered axis: {message}")]
    UnorderedAxis { message: String },

    /// A SELL would consume more than the open FIFO inventory.
    #[error(
        "insufficient inventory for {instrument}: sell of {requested} exceeds open quantity {available}"
    )]
    InsufficientInventory {
        instrument: String,
        /// Quantity of the offending SELL.
        requested: f64,
        /// Open quantity before the SELL was applied.
        available: f64,
    },

    /// A referenced pricing run does not exist in the repository.
    #[error("pricing run not found: {run_id}")]
    RunNotFound { run_id: String },

    /// A record could not be encoded or decoded by the repository.
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl PricerError {
    /// Whether this error belongs to the domain/value family.
    ///
    /// Inventory violations are a refinement of value errors, so they count.
    /// Type, not-found and storage errors do not.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidShape { .. }
                | Self::UnorderedAxis { .. }
                | Self::InsufficientInventory { .. }
        )
    }
}
