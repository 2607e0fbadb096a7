//! Grid evaluation of a pricing engine.
//!
//! ```
//! use bsm_pricer::surface::value_surface;
//!
//! let surface = value_surface(&[80.0, 100.0, 120.0], &[0.1, 0.3], 100.0, 1.0, 0.05)?;
//! assert_eq!(surface.shape(), (2, 3));
//! assert!(surface.call_at(1, 2).unwrap() > surface.call_at(0, 2).unwrap());
//! # Ok::<(), bsm_pricer::PricerError>(())
//! ```

use crate::error;
use crate::pricing::{CheckedEngine, PricingEngine, PricingParameters};
use crate::surface::ValueSurface;
use crate::validate::{validate_axis_order, validate_axis_shape, validate_axis_values};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Value surface priced with [`price_checked`](crate::pricing::price_checked).
///
/// See [`value_surface_with`] for the axis contract and errors.
pub fn value_surface(
    spot_axis: &[f64],
    vol_axis: &[f64],
    strike: f64,
    expiry: f64,
    rate: f64,
) -> error::Result<ValueSurface> {
    value_surface_with(&CheckedEngine, spot_axis, vol_axis, strike, expiry, rate)
}

/// Evaluate `engine` once for every `(vol, spot)` pair.
///
/// Axes are stored unmodified; they are never sorted or deduplicated. Domain
/// policy (positive spot, non-negative vol, ...) is entirely the engine's
/// business, and the first cell that fails aborts the whole surface with
/// that cell's error.
///
/// # Errors
/// - [`PricerError::InvalidShape`](crate::PricerError::InvalidShape) if
///   either axis is empty
/// - [`PricerError::InvalidInput`](crate::PricerError::InvalidInput) if
///   either axis has a non-finite entry
/// - [`PricerError::UnorderedAxis`](crate::PricerError::UnorderedAxis) if an
///   axis with more than one entry is not strictly increasing
/// - whatever the engine returns for a failing cell
pub fn value_surface_with<E>(
    engine: &E,
    spot_axis: &[f64],
    vol_axis: &[f64],
    strike: f64,
    expiry: f64,
    rate: f64,
) -> error::Result<ValueSurface>
where
    E: PricingEngine + ?Sized,
{
    validate_axis_shape(spot_axis, "S_axis")?;
    validate_axis_shape(vol_axis, "sigma_axis")?;
    validate_axis_values(spot_axis, "S_axis")?;
    validate_axis_values(vol_axis, "sigma_axis")?;
    validate_axis_order(spot_axis, "S_axis")?;
    validate_axis_order(vol_axis, "sigma_axis")?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        n_spot = spot_axis.len(),
        n_vol = vol_axis.len(),
        strike,
        expiry,
        rate,
        engine = engine.name(),
        "value surface evaluation started"
    );

    let row = |vol: f64| evaluate_row(engine, spot_axis, vol, strike, expiry, rate);

    #[cfg(feature = "parallel")]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vol_axis
        .par_iter()
        .map(|&vol| row(vol))
        .collect::<error::Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vol_axis
        .iter()
        .map(|&vol| row(vol))
        .collect::<error::Result<_>>()?;

    let (call, put): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

    ValueSurface::new(
        spot_axis.to_vec(),
        vol_axis.to_vec(),
        call,
        put,
        strike,
        expiry,
        rate,
    )
}

/// One volatility row: call and put values across the spot axis.
fn evaluate_row<E>(
    engine: &E,
    spot_axis: &[f64],
    vol: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
) -> error::Result<(Vec<f64>, Vec<f64>)>
where
    E: PricingEngine + ?Sized,
{
    let mut call = Vec::with_capacity(spot_axis.len());
    let mut put = Vec::with_capacity(spot_axis.len());
    for &spot in spot_axis {
        let res = engine.price(&PricingParameters::new(spot, strike, vol, expiry, rate))?;
        call.push(res.call);
        put.push(res.put);
    }
    Ok((call, put))
}
