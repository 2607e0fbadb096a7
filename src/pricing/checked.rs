//! Validated pricing entry point.
//!
//! Applies domain policy before touching the kernel:
//!
//! 1. every parameter must be finite (checked S, K, sigma, T, r in order)
//! 2. `S > 0`, `K > 0`, `sigma >= 0`, `T >= 0`; `r` is unrestricted
//! 3. `T == 0` returns the expiry payoff and never looks at sigma
//! 4. `sigma == 0` returns the deterministic forward limit, as does any
//!    `sigma` so small that `sigma·√T` cannot be resolved against `ln(S/K)`
//! 5. otherwise the closed-form [`black_scholes`] kernel
//!
//! Results are always finite: inputs that overflow the arithmetic are
//! rejected rather than priced.

use crate::conventions::present_value;
use crate::error::{self, PricerError};
use crate::pricing::black_scholes::black_scholes;
use crate::pricing::{PricingEngine, PricingParameters, PricingResult};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Price a European call and put with full input validation.
///
/// # Arguments
/// * `spot` — Underlying price `S` (must be > 0)
/// * `strike` — Strike `K` (must be > 0)
/// * `vol` — Volatility `σ` (must be >= 0)
/// * `expiry` — Time to expiry `T` in years (must be >= 0)
/// * `rate` — Risk-free rate `r` (any finite value)
///
/// # Errors
/// Returns [`PricerError::InvalidInput`](crate::PricerError::InvalidInput)
/// for any non-finite parameter or any domain violation, and for finite
/// inputs extreme enough that a price or d1/d2 overflows (for example
/// `K·e^(−rT)` exceeding `f64::MAX`).
///
/// # Examples
/// ```
/// use bsm_pricer::pricing::price_checked;
///
/// // At expiry the value is the payoff, whatever the volatility.
/// let r = price_checked(120.0, 100.0, 0.2, 0.0, 0.05)?;
/// assert_eq!((r.call, r.put), (20.0, 0.0));
///
/// assert!(price_checked(0.0, 100.0, 0.2, 1.0, 0.05).is_err());
/// # Ok::<(), bsm_pricer::PricerError>(())
/// ```
pub fn price_checked(
    spot: f64,
    strike: f64,
    vol: f64,
    expiry: f64,
    rate: f64,
) -> error::Result<PricingResult> {
    validate_finite(spot, "S")?;
    validate_finite(strike, "K")?;
    validate_finite(vol, "sigma")?;
    validate_finite(expiry, "T")?;
    validate_finite(rate, "r")?;

    validate_positive(spot, "S")?;
    validate_positive(strike, "K")?;
    validate_non_negative(vol, "sigma")?;
    validate_non_negative(expiry, "T")?;

    if expiry == 0.0 {
        #[cfg(feature = "logging")]
        tracing::trace!(spot, strike, "expiry payoff branch");
        return Ok(payoff_at_expiry(spot, strike));
    }

    let total_std = vol * expiry.sqrt();
    if total_std == 0.0 {
        #[cfg(feature = "logging")]
        tracing::trace!(spot, strike, expiry, rate, "zero-vol deterministic branch");
        return ensure_finite(deterministic_limit(spot, strike, expiry, rate));
    }

    let result = black_scholes(&PricingParameters::new(
        spot, strike, vol, expiry, rate,
    ));
    // d1 = ±∞ with σ√T < 1 means σ√T vanished against ln(S/K).
    if total_std < 1.0 && result.d1.is_some_and(f64::is_infinite) {
        #[cfg(feature = "logging")]
        tracing::trace!(spot, strike, vol, expiry, "vanishing-vol deterministic branch");
        return ensure_finite(deterministic_limit(spot, strike, expiry, rate));
    }
    ensure_finite(result)
}

fn ensure_finite(result: PricingResult) -> error::Result<PricingResult> {
    let finite = result.call.is_finite()
        && result.put.is_finite()
        && result.d1.is_none_or(f64::is_finite)
        && result.d2.is_none_or(f64::is_finite);
    if !finite {
        return Err(PricerError::InvalidInput {
            message: format!("inputs overflow the pricing arithmetic: {result:?}"),
        });
    }
    Ok(result)
}

/// Intrinsic value at expiry.
fn payoff_at_expiry(spot: f64, strike: f64) -> PricingResult {
    PricingResult::new((spot - strike).max(0.0), (strike - spot).max(0.0))
}

/// σ → 0 limit: the underlying grows deterministically, so only the
/// discounted strike matters.
fn deterministic_limit(spot: f64, strike: f64, expiry: f64, rate: f64) -> PricingResult {
    let pv_strike = present_value(strike, rate, expiry);
    PricingResult::new((spot - pv_strike).max(0.0), (pv_strike - spot).max(0.0))
}

/// [`price_checked`] as a [`PricingEngine`].
///
/// This is the default engine for surfaces and the pricing service.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedEngine;

impl PricingEngine for CheckedEngine {
    fn price(&self, params: &PricingParameters) -> error::Result<PricingResult> {
        price_checked(
            params.spot,
            params.strike,
            params.vol,
            params.expiry,
            params.rate,
        )
    }

    fn name(&self) -> &str {
        "price_checked"
    }
}
