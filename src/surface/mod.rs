//! Option value surfaces over a (volatility, spot) grid.
//!
//! A value surface holds call and put prices for every pair in the Cartesian
//! product of a volatility axis and a spot axis, with strike, expiry and rate
//! fixed. Rows follow the volatility axis, columns the spot axis:
//! `call[i][j]` is the call value at `(vol_axis[i], spot_axis[j])`.
//!
//! - [`value_surface`] / [`value_surface_with`] — build a surface from axes
//! - [`linspace`] / [`parse_axis`] — axis construction helpers

pub mod axis;
pub mod grid;

pub use axis::{linspace, parse_axis};
pub use grid::{value_surface, value_surface_with};

use serde::{Deserialize, Serialize};

use crate::error::{self, PricerError};

/// Call and put value matrices with the axes they were evaluated on.
///
/// Immutable once built. Construction and deserialization both enforce the
/// shape contract: `(vol_axis.len(), spot_axis.len())` for both matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValueSurfaceRaw", into = "ValueSurfaceRaw")]
pub struct ValueSurface {
    spot_axis: Vec<f64>,
    vol_axis: Vec<f64>,
    call: Vec<Vec<f64>>,
    put: Vec<Vec<f64>>,
    strike: f64,
    expiry: f64,
    rate: f64,
}

#[derive(Serialize, Deserialize)]
struct ValueSurfaceRaw {
    #[serde(rename = "S_axis")]
    spot_axis: Vec<f64>,
    #[serde(rename = "sigma_axis")]
    vol_axis: Vec<f64>,
    call: Vec<Vec<f64>>,
    put: Vec<Vec<f64>>,
    #[serde(rename = "K")]
    strike: f64,
    #[serde(rename = "T")]
    expiry: f64,
    #[serde(rename = "r")]
    rate: f64,
}

impl TryFrom<ValueSurfaceRaw> for ValueSurface {
    type Error = PricerError;
    fn try_from(raw: ValueSurfaceRaw) -> Result<Self, Self::Error> {
        Self::new(
            raw.spot_axis,
            raw.vol_axis,
            raw.call,
            raw.put,
            raw.strike,
            raw.expiry,
            raw.rate,
        )
    }
}

impl From<ValueSurface> for ValueSurfaceRaw {
    fn from(s: ValueSurface) -> Self {
        Self {
            spot_axis: s.spot_axis,
            vol_axis: s.vol_axis,
            call: s.call,
            put: s.put,
            strike: s.strike,
            expiry: s.expiry,
            rate: s.rate,
        }
    }
}

impl ValueSurface {
    /// Assemble a surface from precomputed matrices.
    ///
    /// Only the shape contract is checked here; axis ordering and pricing
    /// policy belong to [`value_surface_with`].
    ///
    /// # Errors
    /// Returns [`PricerError::InvalidShape`] if `call` does not have one row
    /// per volatility and one column per spot, or `put` differs in shape.
    pub fn new(
        spot_axis: Vec<f64>,
        vol_axis: Vec<f64>,
        call: Vec<Vec<f64>>,
        put: Vec<Vec<f64>>,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> error::Result<Self> {
        check_matrix_shape(&call, vol_axis.len(), spot_axis.len(), "call")?;
        check_matrix_shape(&put, vol_axis.len(), spot_axis.len(), "put")?;
        Ok(Self {
            spot_axis,
            vol_axis,
            call,
            put,
            strike,
            expiry,
            rate,
        })
    }

    /// Spot axis (columns).
    pub fn spot_axis(&self) -> &[f64] {
        &self.spot_axis
    }

    /// Volatility axis (rows).
    pub fn vol_axis(&self) -> &[f64] {
        &self.vol_axis
    }

    /// Call values, one row per volatility.
    pub fn call(&self) -> &[Vec<f64>] {
        &self.call
    }

    /// Put values, one row per volatility.
    pub fn put(&self) -> &[Vec<f64>] {
        &self.put
    }

    /// Strike shared by every cell.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry shared by every cell.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free rate shared by every cell.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Matrix shape as `(rows, cols)` = `(vol_axis.len(), spot_axis.len())`.
    pub fn shape(&self) -> (usize, usize) {
        (self.vol_axis.len(), self.spot_axis.len())
    }

    /// Call value at row `i` (volatility) and column `j` (spot), if in range.
    pub fn call_at(&self, i: usize, j: usize) -> Option<f64> {
        self.call.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Put value at row `i` (volatility) and column `j` (spot), if in range.
    pub fn put_at(&self, i: usize, j: usize) -> Option<f64> {
        self.put.get(i).and_then(|row| row.get(j)).copied()
    }
}

fn check_matrix_shape(
    matrix: &[Vec<f64>],
    rows: usize,
    cols: usize,
    name: &str,
) -> error::Result<()> {
    if matrix.len() != rows {
        return Err(PricerError::InvalidShape {
            message: format!("{name} has {} rows, expected {rows}", matrix.len()),
        });
    }
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(PricerError::InvalidShape {
            message: format!("{name} row {i} has {} columns, expected {cols}", row.len()),
        });
    }
    Ok(())
}
