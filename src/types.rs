//! Core domain types shared by pricing, accounting and storage.
//!
//! Identifiers are opaque string newtypes so a run id can never be passed
//! where an instrument id is expected. The storage layer decides how they
//! are actually encoded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Option type: call or put.
///
/// Persisted as `"C"` / `"P"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    #[serde(rename = "C")]
    Call,
    /// Right to sell at strike price.
    #[serde(rename = "P")]
    Put,
}

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Adds inventory as a new FIFO lot.
    Buy,
    /// Consumes inventory oldest lot first.
    Sell,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a traded instrument (ticker, OCC symbol, ...).
    ///
    /// # Examples
    /// ```
    /// use bsm_pricer::types::InstrumentId;
    /// let id = InstrumentId::from("AAPL");
    /// assert_eq!(id.as_str(), "AAPL");
    /// ```
    InstrumentId
);

string_id!(
    /// Identifier of a persisted pricing run, typically a UUID string.
    RunId
);

string_id!(
    /// Identifier of a persisted value surface, typically a UUID string.
    SurfaceId
);
