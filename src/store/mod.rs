//! Persistence seam for pricing runs and surfaces.
//!
//! The accounting layer only ever needs [`RunLookup`]: "given a run id,
//! return the stored run if there is one". [`Repository`] adds the write side
//! used by the pricing service. [`MemoryRepository`] is the in-process
//! implementation; durable backends implement the same traits.

pub mod memory;
pub mod models;

pub use memory::MemoryRepository;
pub use models::{
    PricingInputs, PricingOutputs, PricingRun, SCHEMA_VERSION, SurfaceData, SurfaceSpec,
};

use crate::error;
use crate::types::{RunId, SurfaceId};

/// Read access to persisted pricing runs.
pub trait RunLookup {
    /// The run stored under `run_id`, or `None` if there is none.
    fn get_pricing_run(&self, run_id: &RunId) -> error::Result<Option<PricingRun>>;
}

/// Full run and surface storage.
///
/// Saving under an existing id replaces the previous record.
pub trait Repository: RunLookup + Send + Sync {
    fn save_pricing_run(&self, run: &PricingRun) -> error::Result<()>;

    /// Up to `limit` run ids, most recently saved first.
    fn list_pricing_runs(&self, limit: usize) -> error::Result<Vec<RunId>>;

    fn save_surface(&self, spec: &SurfaceSpec, data: &SurfaceData) -> error::Result<()>;

    fn get_surface(&self, surface_id: &SurfaceId)
    -> error::Result<Option<(SurfaceSpec, SurfaceData)>>;
}
