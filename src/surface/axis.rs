//! Axis construction helpers.

use serde_json::Value;

use crate::error::{self, PricerError};

/// `n` evenly spaced points from `start` to `stop` inclusive.
///
/// `n == 0` gives an empty axis and `n == 1` gives `[start]`. The last point
/// is exactly `stop`.
///
/// # Examples
/// ```
/// use bsm_pricer::surface::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Read an axis from a dynamic JSON value.
///
/// # Errors
/// - [`PricerError::InvalidShape`] if the value is not an array, or any
///   element is itself an array or object (the axis is not one-dimensional)
/// - [`PricerError::InvalidType`] if an element is not a number
///
/// Emptiness, finiteness and ordering are checked later by
/// [`value_surface_with`](crate::surface::value_surface_with).
pub fn parse_axis(value: &Value, name: &str) -> error::Result<Vec<f64>> {
    let items = value.as_array().ok_or_else(|| PricerError::InvalidShape {
        message: format!("{name} must be a one-dimensional array"),
    })?;
    items
        .iter()
        .map(|item| match item {
            Value::Array(_) | Value::Object(_) => Err(PricerError::InvalidShape {
                message: format!("{name} must be one-dimensional, found nested {item}"),
            }),
            other => other.as_f64().ok_or_else(|| PricerError::InvalidType {
                message: format!("{name} entries must be numbers, got {other}"),
            }),
        })
        .collect()
}
