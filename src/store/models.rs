//! Persisted record schema for pricing runs and surfaces.
//!
//! These are plain data: no domain checks happen here (that is the pricing
//! layer's job). Every record carries [`SCHEMA_VERSION`] and reads back the
//! current version when the field is absent. Timestamps are UTC by type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::PricingParameters;
use crate::types::{InstrumentId, OptionType, RunId, SurfaceId};

/// Version stamped on every record written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

fn current_schema() -> u32 {
    SCHEMA_VERSION
}

/// Inputs of one pricing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    #[serde(default = "current_schema")]
    pub schema_version: u32,
    #[serde(default)]
    pub run_id: Option<RunId>,
    #[serde(default)]
    pub instrument_id: Option<InstrumentId>,
    pub asof_utc: DateTime<Utc>,
    #[serde(flatten)]
    pub params: PricingParameters,
    pub option_type: OptionType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of one pricing request. Only the requested leg is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOutputs {
    #[serde(default = "current_schema")]
    pub schema_version: u32,
    #[serde(default)]
    pub run_id: Option<RunId>,
    pub computed_at_utc: DateTime<Utc>,
    pub option_type: OptionType,
    pub price: f64,
    #[serde(default)]
    pub d1: Option<f64>,
    #[serde(default)]
    pub d2: Option<f64>,
    /// Engine name, e.g. `"price_checked"`.
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub engine_version: Option<String>,
}

/// One atomic computation: inputs plus outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRun {
    #[serde(default = "current_schema")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub inputs: PricingInputs,
    pub outputs: PricingOutputs,
}

/// A surface job: grid axes plus the constants shared by every cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    #[serde(default = "current_schema")]
    pub schema_version: u32,
    #[serde(default)]
    pub surface_id: Option<SurfaceId>,
    pub created_at_utc: DateTime<Utc>,
    #[serde(rename = "S_axis", default)]
    pub spot_axis: Vec<f64>,
    #[serde(rename = "sigma_axis", default)]
    pub vol_axis: Vec<f64>,
    #[serde(rename = "K")]
    pub strike: f64,
    #[serde(rename = "T")]
    pub expiry: f64,
    #[serde(rename = "r")]
    pub rate: f64,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Computed call/put matrices for a [`SurfaceSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceData {
    #[serde(default = "current_schema")]
    pub schema_version: u32,
    pub surface_id: SurfaceId,
    pub computed_at_utc: DateTime<Utc>,
    pub call_matrix: Vec<Vec<f64>>,
    pub put_matrix: Vec<Vec<f64>>,
    #[serde(default)]
    pub engine_version: Option<String>,
}
