//! Compute-then-persist orchestration.
//!
//! [`PricingService`] prices a point or a whole surface with its engine and
//! hands the records to its repository. It adds ids and timestamps but no
//! pricing logic of its own.
//!
//! ```
//! use bsm_pricer::pricing::PricingParameters;
//! use bsm_pricer::service::{PointRequest, PricingService};
//! use bsm_pricer::store::{MemoryRepository, RunLookup};
//! use bsm_pricer::types::OptionType;
//!
//! let svc = PricingService::new(MemoryRepository::new());
//! let params = PricingParameters::new(100.0, 100.0, 0.2, 1.0, 0.05);
//! let run = svc.run_point(PointRequest::new(params, OptionType::Call))?;
//!
//! let stored = svc.repo().get_pricing_run(&run.run_id)?.unwrap();
//! assert_eq!(stored.outputs.price, run.outputs.price);
//! # Ok::<(), bsm_pricer::PricerError>(())
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{self, PricerError};
use crate::pricing::{CheckedEngine, PricingEngine, PricingParameters};
use crate::store::{
    PricingInputs, PricingOutputs, PricingRun, Repository, SCHEMA_VERSION, SurfaceData,
    SurfaceSpec,
};
use crate::surface::value_surface_with;
use crate::types::{InstrumentId, OptionType, RunId, SurfaceId};

/// Version recorded as `engine_version` on every output.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A single-point pricing job.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRequest {
    pub params: PricingParameters,
    pub option_type: OptionType,
    /// Generated (UUID v4) when absent.
    pub run_id: Option<RunId>,
    /// Defaults to now.
    pub asof_utc: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub instrument_id: Option<InstrumentId>,
}

impl PointRequest {
    pub fn new(params: PricingParameters, option_type: OptionType) -> Self {
        Self {
            params,
            option_type,
            run_id: None,
            asof_utc: None,
            tags: Vec::new(),
            notes: None,
            instrument_id: None,
        }
    }

    pub fn run_id(mut self, run_id: impl Into<RunId>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn asof(mut self, asof_utc: DateTime<Utc>) -> Self {
        self.asof_utc = Some(asof_utc);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn instrument(mut self, instrument_id: impl Into<InstrumentId>) -> Self {
        self.instrument_id = Some(instrument_id.into());
        self
    }
}

/// A value-surface job.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRequest {
    pub spot_axis: Vec<f64>,
    pub vol_axis: Vec<f64>,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    /// Generated (UUID v4) when absent.
    pub surface_id: Option<SurfaceId>,
    /// Defaults to now.
    pub created_at_utc: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl SurfaceRequest {
    pub fn new(
        spot_axis: Vec<f64>,
        vol_axis: Vec<f64>,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> Self {
        Self {
            spot_axis,
            vol_axis,
            strike,
            expiry,
            rate,
            surface_id: None,
            created_at_utc: None,
            tags: Vec::new(),
            notes: None,
        }
    }

    pub fn surface_id(mut self, surface_id: impl Into<SurfaceId>) -> Self {
        self.surface_id = Some(surface_id.into());
        self
    }

    pub fn created_at(mut self, created_at_utc: DateTime<Utc>) -> Self {
        self.created_at_utc = Some(created_at_utc);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Prices with `E` and persists to `R`.
#[derive(Debug)]
pub struct PricingService<R, E = CheckedEngine> {
    repo: R,
    engine: E,
}

impl<R: Repository> PricingService<R> {
    /// Service using [`CheckedEngine`].
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            engine: CheckedEngine,
        }
    }
}

impl<R: Repository, E: PricingEngine> PricingService<R, E> {
    pub fn with_engine(repo: R, engine: E) -> Self {
        Self { repo, engine }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Price one point, persist the run and return it.
    ///
    /// # Errors
    /// Engine errors propagate and nothing is saved. Repository errors
    /// propagate after pricing succeeded.
    pub fn run_point(&self, req: PointRequest) -> error::Result<PricingRun> {
        let run_id = req.run_id.unwrap_or_else(new_run_id);
        let asof_utc = req.asof_utc.unwrap_or_else(Utc::now);

        let result = self.engine.price(&req.params)?;
        let price = result.price(req.option_type);

        let run = PricingRun {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.clone(),
            inputs: PricingInputs {
                schema_version: SCHEMA_VERSION,
                run_id: Some(run_id.clone()),
                instrument_id: req.instrument_id,
                asof_utc,
                params: req.params,
                option_type: req.option_type,
                tags: req.tags,
                notes: req.notes,
            },
            outputs: PricingOutputs {
                schema_version: SCHEMA_VERSION,
                run_id: Some(run_id),
                computed_at_utc: Utc::now(),
                option_type: req.option_type,
                price,
                d1: result.d1,
                d2: result.d2,
                engine: Some(self.engine.name().to_owned()),
                engine_version: Some(ENGINE_VERSION.to_owned()),
            },
        };

        self.repo.save_pricing_run(&run)?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            run_id = %run.run_id,
            option_type = ?run.outputs.option_type,
            price,
            "point run complete"
        );

        Ok(run)
    }

    /// Compute a value surface, persist its spec and matrices, return both.
    ///
    /// # Errors
    /// Axis and engine errors from
    /// [`value_surface_with`](crate::surface::value_surface_with) propagate
    /// and nothing is saved.
    pub fn run_surface(&self, req: SurfaceRequest) -> error::Result<(SurfaceSpec, SurfaceData)> {
        let surface_id = req.surface_id.unwrap_or_else(new_surface_id);
        let created_at_utc = req.created_at_utc.unwrap_or_else(Utc::now);

        let surface = value_surface_with(
            &self.engine,
            &req.spot_axis,
            &req.vol_axis,
            req.strike,
            req.expiry,
            req.rate,
        )?;

        let spec = SurfaceSpec {
            schema_version: SCHEMA_VERSION,
            surface_id: Some(surface_id.clone()),
            created_at_utc,
            spot_axis: req.spot_axis,
            vol_axis: req.vol_axis,
            strike: req.strike,
            expiry: req.expiry,
            rate: req.rate,
            engine: Some(self.engine.name().to_owned()),
            tags: req.tags,
            notes: req.notes,
        };
        let data = SurfaceData {
            schema_version: SCHEMA_VERSION,
            surface_id,
            computed_at_utc: Utc::now(),
            call_matrix: surface.call().to_vec(),
            put_matrix: surface.put().to_vec(),
            engine_version: Some(ENGINE_VERSION.to_owned()),
        };

        self.repo.save_surface(&spec, &data)?;

        #[cfg(feature = "logging")]
        tracing::debug!(surface_id = %data.surface_id, shape = ?surface.shape(), "surface run complete");

        Ok((spec, data))
    }

    /// Recompute a stored run from its persisted inputs with this engine.
    ///
    /// Returns the price for the run's stored option type.
    ///
    /// # Errors
    /// Returns [`PricerError::RunNotFound`] if `run_id` is not stored, or
    /// the engine's error.
    pub fn replay(&self, run_id: &RunId) -> error::Result<f64> {
        let run = self
            .repo
            .get_pricing_run(run_id)?
            .ok_or_else(|| PricerError::RunNotFound {
                run_id: run_id.to_string(),
            })?;
        let result = self.engine.price(&run.inputs.params)?;
        Ok(result.price(run.outputs.option_type))
    }
}

fn new_run_id() -> RunId {
    RunId(Uuid::new_v4().to_string())
}

fn new_surface_id() -> SurfaceId {
    SurfaceId(Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PricingResult, price_checked};
    use crate::store::{MemoryRepository, RunLookup};
    use chrono::TimeZone;

    fn params() -> PricingParameters {
        PricingParameters::new(100.0, 100.0, 0.2, 1.0, 0.05)
    }

    #[test]
    fn run_point_persists_selected_leg() {
        let svc = PricingService::new(MemoryRepository::new());
        let run = svc
            .run_point(PointRequest::new(params(), OptionType::Put).run_id("p1"))
            .unwrap();
        let expected = price_checked(100.0, 100.0, 0.2, 1.0, 0.05).unwrap();
        assert_eq!(run.outputs.price, expected.put);
        assert_eq!(run.outputs.d1, expected.d1);
        assert_eq!(run.outputs.engine.as_deref(), Some("price_checked"));
        assert_eq!(run.run_id.as_str(), "p1");
        assert_eq!(svc.repo().get_pricing_run(&"p1".into()).unwrap(), Some(run));
    }

    #[test]
    fn generated_ids_are_uuids() {
        let svc = PricingService::new(MemoryRepository::new());
        let run = svc
            .run_point(PointRequest::new(params(), OptionType::Call))
            .unwrap();
        assert!(Uuid::parse_str(run.run_id.as_str()).is_ok());
        assert_eq!(run.inputs.run_id.as_ref(), Some(&run.run_id));
    }

    #[test]
    fn failed_pricing_persists_nothing() {
        let svc = PricingService::new(MemoryRepository::new());
        let bad = PricingParameters::new(-1.0, 100.0, 0.2, 1.0, 0.05);
        assert!(svc.run_point(PointRequest::new(bad, OptionType::Call)).is_err());
        assert_eq!(svc.repo().run_count(), 0);
    }

    #[test]
    fn replay_matches_persisted_price() {
        let svc = PricingService::new(MemoryRepository::new());
        let fixed = Utc.with_ymd_and_hms(2026, 1, 30, 0, 0, 0).unwrap();
        let run = svc
            .run_point(
                PointRequest::new(params(), OptionType::Call)
                    .asof(fixed)
                    .tag("replay-test"),
            )
            .unwrap();
        assert_eq!(run.inputs.asof_utc, fixed);
        assert_eq!(svc.replay(&run.run_id).unwrap(), run.outputs.price);
    }

    #[test]
    fn replay_unknown_run_is_not_found() {
        let svc = PricingService::new(MemoryRepository::new());
        assert!(matches!(
            svc.replay(&"missing".into()),
            Err(PricerError::RunNotFound { .. })
        ));
    }

    #[test]
    fn custom_engine_is_used() {
        let flat = |_: &PricingParameters| -> error::Result<PricingResult> {
            Ok(PricingResult::new(1.0, 2.0))
        };
        let svc = PricingService::with_engine(MemoryRepository::new(), flat);
        let run = svc
            .run_point(PointRequest::new(params(), OptionType::Put))
            .unwrap();
        assert_eq!(run.outputs.price, 2.0);
        assert_eq!(run.outputs.engine.as_deref(), Some("custom"));
    }

    #[test]
    fn run_surface_persists_spec_and_data() {
        let svc = PricingService::new(MemoryRepository::new());
        let (spec, data) = svc
            .run_surface(
                SurfaceRequest::new(vec![80.0, 100.0, 120.0], vec![0.1, 0.3], 100.0, 1.0, 0.05)
                    .surface_id("s1"),
            )
            .unwrap();
        assert_eq!(data.call_matrix.len(), 2);
        assert_eq!(data.call_matrix[0].len(), 3);
        assert_eq!(spec.surface_id, Some("s1".into()));

        let (s, d) = svc.repo().get_surface(&"s1".into()).unwrap().unwrap();
        assert_eq!(s, spec);
        assert_eq!(d, data);
    }

    #[test]
    fn run_surface_rejects_unordered_axis() {
        let svc = PricingService::new(MemoryRepository::new());
        let r = svc.run_surface(
            SurfaceRequest::new(vec![100.0, 80.0], vec![0.2], 100.0, 1.0, 0.05).surface_id("bad"),
        );
        assert!(matches!(r, Err(PricerError::UnorderedAxis { .. })));
        assert!(svc.repo().get_surface(&"bad".into()).unwrap().is_none());
    }
}
