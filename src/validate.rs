//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly.

use crate::error::PricerError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricerError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricerError::InvalidInput {
            message: format!("{name} must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(PricerError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Reject non-finite axis entries.
///
/// Axis checks are split into shape, values and order so callers can run
/// each stage for every axis before moving to the next.
pub(crate) fn validate_axis_values(axis: &[f64], name: &str) -> crate::error::Result<()> {
    if let Some(bad) = axis.iter().find(|v| !v.is_finite()) {
        return Err(PricerError::InvalidInput {
            message: format!("{name} must be finite, got {bad}"),
        });
    }
    Ok(())
}

/// Reject empty axes.
pub(crate) fn validate_axis_shape(axis: &[f64], name: &str) -> crate::error::Result<()> {
    if axis.is_empty() {
        return Err(PricerError::InvalidShape {
            message: format!("{name} must be non-empty"),
        });
    }
    Ok(())
}

/// Reject duplicate or descending neighbours. Single-element axes always pass.
pub(crate) fn validate_axis_order(axis: &[f64], name: &str) -> crate::error::Result<()> {
    if axis.len() > 1 {
        if let Some(pos) = axis.windows(2).position(|w| w[1] <= w[0]) {
            return Err(PricerError::UnorderedAxis {
                message: format!(
                    "{name} must be strictly increasing, got {} then {} at index {}",
                    axis[pos],
                    axis[pos + 1],
                    pos + 1
                ),
            });
        }
    }
    Ok(())
}
