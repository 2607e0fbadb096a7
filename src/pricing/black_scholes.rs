//! Closed-form Black-Scholes-Merton kernel.
//!
//! # Formula
//! ```text
//! d1 = [ln(S/K) + (r + σ²/2)·T] / (σ√T)
//! d2 = d1 − σ√T
//! C  = S·N(d1) − K·e^(−rT)·N(d2)
//! P  = K·e^(−rT)·N(−d2) − S·N(−d1)
//! ```
//!
//! Nothing in this module validates its inputs. It expects finite values with
//! `S > 0`, `K > 0`, `σ > 0` and `T > 0`; use
//! [`price_checked`](crate::pricing::price_checked) for anything else.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf;

use crate::conventions::{log_moneyness, present_value};
use crate::pricing::{PricingParameters, PricingResult};

/// Standard normal cumulative distribution function N(x) = ½·(1 + erf(x/√2)).
///
/// # Examples
/// ```
/// use bsm_pricer::pricing::norm_cdf;
/// assert_eq!(norm_cdf(0.0), 0.5);
/// assert!(norm_cdf(10.0) > 0.999);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Black-Scholes d1 and d2.
#[inline]
pub fn d1_d2(spot: f64, strike: f64, vol: f64, expiry: f64, rate: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * expiry.sqrt();
    let d1 = (log_moneyness(spot, strike) + (rate + 0.5 * vol * vol) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price a European call and put with the closed-form formula.
///
/// Returns d1/d2 alongside the prices.
///
/// # Examples
/// ```
/// use bsm_pricer::pricing::{black_scholes, PricingParameters};
///
/// let r = black_scholes(&PricingParameters::new(100.0, 100.0, 0.2, 1.0, 0.05));
/// assert!((r.call - 10.4506).abs() < 1e-4);
/// assert!((r.put - 5.5735).abs() < 1e-4);
/// ```
pub fn black_scholes(params: &PricingParameters) -> PricingResult {
    let PricingParameters {
        spot,
        strike,
        vol,
        expiry,
        rate,
    } = *params;

    let (d1, d2) = d1_d2(spot, strike, vol, expiry, rate);
    let pv_strike = present_value(strike, rate, expiry);

    let call = spot * norm_cdf(d1) - pv_strike * norm_cdf(d2);
    let put = pv_strike * norm_cdf(-d2) - spot * norm_cdf(-d1);

    PricingResult {
        call,
        put,
        d1: Some(d1),
        d2: Some(d2),
    }
}
