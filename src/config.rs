//! Configuration for default pricing inputs and surface grids, loaded from TOML.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [defaults]
//! S = 100.0
//! K = 100.0
//! T = 1.0
//! r = 0.05
//! sigma = 0.2
//!
//! [grid]
//! spot_min_pct = 0.5
//! spot_max_pct = 1.5
//! spot_steps = 50
//! vol_min = 0.05
//! vol_max = 0.50
//! vol_steps = 20
//! ```
//!
//! Domain validity of the inputs is still enforced by the pricing engine;
//! this layer only checks that the grid can be built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PricingParameters;
use crate::surface::linspace;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inputs used when a caller does not supply its own.
    pub defaults: PricingDefaults,
    /// Value-surface grid settings.
    pub grid: GridConfig,
}

/// Default pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    #[serde(rename = "S")]
    pub spot: f64,
    #[serde(rename = "K")]
    pub strike: f64,
    #[serde(rename = "T")]
    pub expiry: f64,
    #[serde(rename = "r")]
    pub rate: f64,
    #[serde(rename = "sigma")]
    pub vol: f64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            vol: 0.2,
        }
    }
}

impl PricingDefaults {
    pub fn params(&self) -> PricingParameters {
        PricingParameters::new(self.spot, self.strike, self.vol, self.expiry, self.rate)
    }
}

/// Range and density of the value-surface grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First spot point as a fraction of the reference spot.
    pub spot_min_pct: f64,
    /// Last spot point as a fraction of the reference spot.
    pub spot_max_pct: f64,
    pub spot_steps: usize,
    pub vol_min: f64,
    pub vol_max: f64,
    pub vol_steps: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spot_min_pct: 0.5,
            spot_max_pct: 1.5,
            spot_steps: 50,
            vol_min: 0.05,
            vol_max: 0.50,
            vol_steps: 20,
        }
    }
}

impl GridConfig {
    /// Spot axis around `spot`, from `spot_min_pct * spot` to `spot_max_pct * spot`.
    #[must_use]
    pub fn spot_axis(&self, spot: f64) -> Vec<f64> {
        linspace(
            self.spot_min_pct * spot,
            self.spot_max_pct * spot,
            self.spot_steps,
        )
    }

    #[must_use]
    pub fn vol_axis(&self) -> Vec<f64> {
        linspace(self.vol_min, self.vol_max, self.vol_steps)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.spot_steps == 0 || self.vol_steps == 0 {
            return Err(ConfigError::InvalidValue(
                "grid step counts must be positive".to_string(),
            ));
        }
        let ranges = [
            ("spot_min_pct", self.spot_min_pct),
            ("spot_max_pct", self.spot_max_pct),
            ("vol_min", self.vol_min),
            ("vol_max", self.vol_max),
        ];
        if let Some((name, _)) = ranges.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "grid {name} must be finite and non-negative"
            )));
        }
        if self.spot_min_pct >= self.spot_max_pct {
            return Err(ConfigError::InvalidValue(
                "grid spot_min_pct must be below spot_max_pct".to_string(),
            ));
        }
        if self.vol_min >= self.vol_max {
            return Err(ConfigError::InvalidValue(
                "grid vol_min must be below vol_max".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed or validated.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for a zero step count, a negative or
    /// non-finite bound, or an empty range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;

        #[cfg(feature = "logging")]
        tracing::trace!(config = ?self, "config validated");
        Ok(())
    }
}
