//! In-memory repository storing records as opaque JSON blobs.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{self, PricerError};
use crate::store::models::{PricingRun, SurfaceData, SurfaceSpec};
use crate::store::{Repository, RunLookup};
use crate::types::{RunId, SurfaceId};

/// Thread-safe in-memory [`Repository`].
///
/// Each record is serialized to JSON on save and parsed on load, so what
/// comes back is exactly what a blob store would return. Run listing follows
/// save order; re-saving an id moves it to the most recent position.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    runs: RwLock<RunTable>,
    surfaces: RwLock<HashMap<SurfaceId, SurfaceBlobs>>,
}

/// Run blobs keyed by id, each tagged with the sequence number of its last save.
#[derive(Debug, Default)]
struct RunTable {
    rows: HashMap<RunId, (u64, String)>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct SurfaceBlobs {
    spec: String,
    data: String,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pricing runs.
    pub fn run_count(&self) -> usize {
        self.runs.read().rows.len()
    }
}

fn encode<T: Serialize>(value: &T, what: &str) -> error::Result<String> {
    serde_json::to_string(value).map_err(|e| PricerError::Storage {
        message: format!("failed to encode {what}: {e}"),
    })
}

fn decode<T: DeserializeOwned>(blob: &str, what: &str) -> error::Result<T> {
    serde_json::from_str(blob).map_err(|e| PricerError::Storage {
        message: format!("failed to decode {what}: {e}"),
    })
}

impl RunLookup for MemoryRepository {
    fn get_pricing_run(&self, run_id: &RunId) -> error::Result<Option<PricingRun>> {
        let blob = self.runs.read().rows.get(run_id).map(|(_, b)| b.clone());
        blob.map(|b| decode(&b, "pricing run")).transpose()
    }
}

impl Repository for MemoryRepository {
    fn save_pricing_run(&self, run: &PricingRun) -> error::Result<()> {
        let blob = encode(run, "pricing run")?;
        let mut table = self.runs.write();
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(run.run_id.clone(), (seq, blob));

        #[cfg(feature = "logging")]
        tracing::debug!(run_id = %run.run_id, "pricing run saved");
        Ok(())
    }

    fn list_pricing_runs(&self, limit: usize) -> error::Result<Vec<RunId>> {
        let table = self.runs.read();
        let mut ids: Vec<(u64, &RunId)> =
            table.rows.iter().map(|(id, (seq, _))| (*seq, id)).collect();
        ids.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        Ok(ids
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.clone())
            .collect())
    }

    fn save_surface(&self, spec: &SurfaceSpec, data: &SurfaceData) -> error::Result<()> {
        let blobs = SurfaceBlobs {
            spec: encode(spec, "surface spec")?,
            data: encode(data, "surface data")?,
        };
        self.surfaces.write().insert(data.surface_id.clone(), blobs);

        #[cfg(feature = "logging")]
        tracing::debug!(surface_id = %data.surface_id, "surface saved");
        Ok(())
    }

    fn get_surface(
        &self,
        surface_id: &SurfaceId,
    ) -> error::Result<Option<(SurfaceSpec, SurfaceData)>> {
        let Some(blobs) = self.surfaces.read().get(surface_id).cloned() else {
            return Ok(None);
        };
        let spec = decode(&blobs.spec, "surface spec")?;
        let data = decode(&blobs.data, "surface data")?;
        Ok(Some((spec, data)))
    }
}
