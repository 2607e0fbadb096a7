//! European option pricing under Black-Scholes-Merton.
//!
//! - [`black_scholes`] — the closed-form kernel; assumes inputs are already valid
//! - [`price_checked`] — the validated entry point that applies domain policy
//!   and dispatches the degenerate cases (expiry payoff, zero volatility)
//!   before falling through to the kernel
//!
//! Anything that turns five parameters into a [`PricingResult`] can stand in
//! for the engine via the [`PricingEngine`] trait.

pub mod black_scholes;
pub mod checked;

pub use black_scholes::{black_scholes, d1_d2, norm_cdf};
pub use checked::{CheckedEngine, price_checked};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{self, PricerError};
use crate::types::OptionType;

/// The five Black-Scholes inputs.
///
/// Construction does not validate; policy is applied by [`price_checked`].
/// Field names serialize as `S`, `K`, `sigma`, `T`, `r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParameters {
    /// Spot price of the underlying.
    #[serde(rename = "S")]
    pub spot: f64,
    /// Strike price.
    #[serde(rename = "K")]
    pub strike: f64,
    /// Annualized volatility.
    #[serde(rename = "sigma")]
    pub vol: f64,
    /// Time to expiry in years.
    #[serde(rename = "T")]
    pub expiry: f64,
    /// Continuously compounded risk-free rate. Any sign.
    #[serde(rename = "r")]
    pub rate: f64,
}

impl PricingParameters {
    /// Bundle the five inputs in `(S, K, sigma, T, r)` order.
    pub fn new(spot: f64, strike: f64, vol: f64, expiry: f64, rate: f64) -> Self {
        Self {
            spot,
            strike,
            vol,
            expiry,
            rate,
        }
    }

    /// Read parameters from a dynamic JSON object with keys `S`, `K`,
    /// `sigma`, `T`, `r`.
    ///
    /// # Errors
    /// Returns [`PricerError::InvalidType`] if the value is not an object or
    /// any key is missing or not a number. Domain policy is not applied here.
    ///
    /// # Examples
    /// ```
    /// use bsm_pricer::pricing::PricingParameters;
    ///
    /// let v = serde_json::json!({"S": 100, "K": 100, "sigma": 0.2, "T": 1, "r": 0.05});
    /// let p = PricingParameters::from_value(&v)?;
    /// assert_eq!(p.spot, 100.0);
    ///
    /// let bad = serde_json::json!({"S": "100", "K": 100, "sigma": 0.2, "T": 1, "r": 0.05});
    /// assert!(PricingParameters::from_value(&bad).is_err());
    /// # Ok::<(), bsm_pricer::PricerError>(())
    /// ```
    pub fn from_value(value: &Value) -> error::Result<Self> {
        let obj = value.as_object().ok_or_else(|| PricerError::InvalidType {
            message: "pricing parameters must be an object".into(),
        })?;
        let field = |name: &str| -> error::Result<f64> {
            let v = obj.get(name).ok_or_else(|| PricerError::InvalidType {
                message: format!("{name} is required"),
            })?;
            v.as_f64().ok_or_else(|| PricerError::InvalidType {
                message: format!("{name} must be a number, got {v}"),
            })
        };
        Ok(Self::new(
            field("S")?,
            field("K")?,
            field("sigma")?,
            field("T")?,
            field("r")?,
        ))
    }
}

/// Call and put values for one parameter set.
///
/// `d1`/`d2` are only present when the closed-form branch was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// European call value.
    pub call: f64,
    /// European put value.
    pub put: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d2: Option<f64>,
}

impl PricingResult {
    /// Result without d1/d2, as produced by the degenerate branches.
    pub fn new(call: f64, put: f64) -> Self {
        Self {
            call,
            put,
            d1: None,
            d2: None,
        }
    }

    /// Value of the requested leg.
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call,
            OptionType::Put => self.put,
        }
    }
}

/// A pricing engine: five Black-Scholes inputs in, call/put values out.
///
/// All implementations must be `Send + Sync` so one engine can serve
/// concurrent surface cells. Any closure of the right shape is an engine:
///
/// ```
/// use bsm_pricer::pricing::{PricingEngine, PricingParameters, PricingResult};
///
/// let intrinsic = |p: &PricingParameters| -> bsm_pricer::Result<PricingResult> {
///     Ok(PricingResult::new((p.spot - p.strike).max(0.0), (p.strike - p.spot).max(0.0)))
/// };
/// let r = intrinsic.price(&PricingParameters::new(110.0, 100.0, 0.2, 1.0, 0.0))?;
/// assert_eq!(r.call, 10.0);
/// # Ok::<(), bsm_pricer::PricerError>(())
/// ```
pub trait PricingEngine: Send + Sync {
    /// Price one parameter set.
    fn price(&self, params: &PricingParameters) -> error::Result<PricingResult>;

    /// Name recorded alongside persisted results.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> PricingEngine for F
where
    F: Fn(&PricingParameters) -> error::Result<PricingResult> + Send + Sync,
{
    fn price(&self, params: &PricingParameters) -> error::Result<PricingResult> {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_all_fields() {
        let v = json!({"S": 90.0, "K": 100, "sigma": 0.25, "T": 0.5, "r": -0.01});
        let p = PricingParameters::from_value(&v).unwrap();
        assert_eq!(p, PricingParameters::new(90.0, 100.0, 0.25, 0.5, -0.01));
    }

    #[test]
    fn from_value_rejects_non_numeric() {
        for key in ["S", "K", "sigma", "T", "r"] {
            let mut v = json!({"S": 100, "K": 100, "sigma": 0.2, "T": 1, "r": 0.05});
            v[key] = json!("oops");
            assert!(
                matches!(
                    PricingParameters::from_value(&v),
                    Err(PricerError::InvalidType { .. })
                ),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn from_value_rejects_missing_and_non_object() {
        let v = json!({"S": 100, "K": 100, "sigma": 0.2, "T": 1});
        assert!(matches!(
            PricingParameters::from_value(&v),
            Err(PricerError::InvalidType { .. })
        ));
        assert!(matches!(
            PricingParameters::from_value(&json!([1, 2, 3])),
            Err(PricerError::InvalidType { .. })
        ));
        let v = json!({"S": null, "K": 100, "sigma": 0.2, "T": 1, "r": 0.0});
        assert!(matches!(
            PricingParameters::from_value(&v),
            Err(PricerError::InvalidType { .. })
        ));
    }

    #[test]
    fn params_serialize_with_short_names() {
        let p = PricingParameters::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v, json!({"S": 1.0, "K": 2.0, "sigma": 3.0, "T": 4.0, "r": 5.0}));
    }

    #[test]
    fn result_selects_leg() {
        let r = PricingResult::new(3.0, 1.0);
        assert_eq!(r.price(OptionType::Call), 3.0);
        assert_eq!(r.price(OptionType::Put), 1.0);
    }

    #[test]
    fn closure_engine_has_default_name() {
        let engine = |_: &PricingParameters| -> error::Result<PricingResult> {
            Ok(PricingResult::new(0.0, 0.0))
        };
        assert_eq!(engine.name(), "custom");
    }
}
