//! Request orchestration: compose the bridge, scheduler, cache, extractor,
//! and solver behind the three query entry points.
//!
//! The orchestrator owns no computation of its own. It derives the cache
//! key, serves hits, dispatches misses to the solver or the graph path,
//! attaches version metadata, and maps every internal failure variant onto
//! a surfaced error. The cache handle, version tracker, and bridge are
//! dependency-injected; there are no module-level singletons.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use crate::cache::{request_key, BinaryStore, ResultCache, ResultNamespace};
use crate::legacy::{CalculatorScheduler, LegacyCalculator, LegacyDocument, LegacyResponse};
use crate::models::{
    DataVersion, ExposurePlan, GraphResult, ImagingTimeRequest, SignalToNoise,
    SpectroscopyGraphRequest, SpectroscopyTimeRequest, Wavelength,
};

use super::exposure_solver::{ExposureTimeSolver, SolverError};
use super::graph_extractor::{self, SnExtraction};
use super::significant_figures;

/// Build identifier reported as `serverVersion`.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Domain failures surfaced to the response channel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItcError {
    #[error("source too bright: detector reaches half well depth in {half_well_seconds:.4} s")]
    SourceTooBright { half_well_seconds: f64 },

    #[error("calculation error: {0}")]
    Calculation(String),

    #[error("integration time error: {0}")]
    IntegrationTime(String),

    #[error("legacy calculator error: {0}")]
    Upstream(String),
}

impl From<SolverError> for ItcError {
    fn from(error: SolverError) -> Self {
        match error {
            SolverError::SourceTooBright { half_well_seconds } => {
                ItcError::SourceTooBright { half_well_seconds }
            }
            SolverError::CalculationError(message) => ItcError::Calculation(message),
            SolverError::NegativeExposure { exposures, seconds } => ItcError::IntegrationTime(
                format!("non-positive exposure plan ({} x {} s)", exposures, seconds),
            ),
            SolverError::Upstream(message) => ItcError::Upstream(message),
        }
    }
}

/// A payload together with the versions it was produced under.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub server_version: String,
    pub data_version: Option<DataVersion>,
    pub result: T,
}

/// Version metadata alone, for the `versions` query.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceVersions {
    pub server_version: String,
    pub data_version: Option<DataVersion>,
}

/// The request-processing engine behind the query surface.
pub struct ItcService {
    bridge: Arc<dyn LegacyCalculator>,
    scheduler: Arc<CalculatorScheduler>,
    solver: ExposureTimeSolver,
    cache: ResultCache,
    last_known_version: RwLock<Option<DataVersion>>,
}

impl ItcService {
    /// Assemble the service over an injected bridge and byte store.
    pub fn new(bridge: Arc<dyn LegacyCalculator>, store: Arc<dyn BinaryStore>) -> Self {
        let scheduler = Arc::new(CalculatorScheduler::new());
        let solver = ExposureTimeSolver::new(bridge.clone(), scheduler.clone());
        Self {
            bridge,
            scheduler,
            solver,
            cache: ResultCache::new(store),
            last_known_version: RwLock::new(None),
        }
    }

    /// Current server and upstream data versions.
    pub async fn versions(&self) -> ServiceVersions {
        ServiceVersions {
            server_version: SERVER_VERSION.to_string(),
            data_version: self.refresh_data_version().await,
        }
    }

    /// Spectroscopy integration time: cached solver result.
    pub async fn spectroscopy_integration_time(
        &self,
        request: SpectroscopyTimeRequest,
    ) -> Result<Versioned<ExposurePlan>, ItcError> {
        let data_version = self.refresh_data_version().await;
        let key = request_key(ResultNamespace::SpectroscopyTime, &request);
        let plan = self
            .cache
            .get_or_compute(&key, || async {
                self.solver.solve_spectroscopy(&request).await.map_err(ItcError::from)
            })
            .await?;
        Ok(self.versioned(data_version, plan))
    }

    /// Imaging integration time: cached direct legacy calculation.
    pub async fn imaging_integration_time(
        &self,
        request: ImagingTimeRequest,
    ) -> Result<Versioned<ExposurePlan>, ItcError> {
        let data_version = self.refresh_data_version().await;
        let key = request_key(ResultNamespace::ImagingTime, &request);
        let plan = self
            .cache
            .get_or_compute(&key, || async {
                self.solver.solve_imaging(&request).await.map_err(ItcError::from)
            })
            .await?;
        Ok(self.versioned(data_version, plan))
    }

    /// Spectroscopy graph: cached legacy call plus series assembly and
    /// optional significant-figure trimming.
    pub async fn spectroscopy_graph(
        &self,
        request: SpectroscopyGraphRequest,
    ) -> Result<Versioned<GraphResult>, ItcError> {
        let data_version = self.refresh_data_version().await;
        let key = request_key(ResultNamespace::SpectroscopyGraph, &request);
        let result = self
            .cache
            .get_or_compute(&key, || async {
                let document = LegacyDocument::for_graphs(
                    &request.target,
                    &request.mode,
                    &request.conditions,
                    request.exposure_time,
                    request.exposures,
                    request.signal_to_noise_at,
                );
                let payload = match self
                    .scheduler
                    .run(self.bridge.calculate_graphs(&document))
                    .await
                {
                    LegacyResponse::Success(payload) => payload,
                    LegacyResponse::Error(message) => return Err(ItcError::Upstream(message)),
                };
                assemble_graph_result(payload, &request)
            })
            .await?;
        Ok(self.versioned(data_version, result))
    }

    /// Ask the bridge for the current upstream data version and keep the
    /// cache aligned with it. Failures fall back to the last version seen;
    /// the request proceeds either way.
    async fn refresh_data_version(&self) -> Option<DataVersion> {
        match self.bridge.data_version().await {
            Ok(version) => {
                if let Err(e) = self.cache.align_data_version(&version).await {
                    warn!(error = %e, "failed to align cache with upstream data version");
                }
                *self.last_known_version.write() = Some(version.clone());
                Some(version)
            }
            Err(e) => {
                warn!(error = %e, "failed to refresh upstream data version");
                self.last_known_version.read().clone()
            }
        }
    }

    fn versioned<T>(&self, data_version: Option<DataVersion>, result: T) -> Versioned<T> {
        Versioned { server_version: SERVER_VERSION.to_string(), data_version, result }
    }
}

/// Assemble the client-facing graph result from a legacy payload: peak and
/// at-wavelength signal-to-noise via the extractor, then trimming.
fn assemble_graph_result(
    payload: crate::legacy::GraphsPayload,
    request: &SpectroscopyGraphRequest,
) -> Result<GraphResult, ItcError> {
    if payload.ccds.is_empty() {
        return Err(ItcError::Calculation("legacy result contains no detector data".to_string()));
    }
    if payload.groups.is_empty() {
        return Err(ItcError::Calculation("legacy result contains no graph data".to_string()));
    }

    let peak_final_sn = require_peak(&payload.groups, graph_extractor::final_sn_at)?;
    let peak_single_sn = require_peak(&payload.groups, graph_extractor::single_sn_at)?;

    let mut warnings = Vec::new();
    let (at_wavelength_final_sn, at_wavelength_single_sn) = match request.signal_to_noise_at {
        None => (None, None),
        Some(wavelength) => {
            let final_sn = at_wavelength(
                graph_extractor::final_sn_at(&payload.groups, Some(wavelength)),
                "final",
                &mut warnings,
            );
            let single_sn = at_wavelength(
                graph_extractor::single_sn_at(&payload.groups, Some(wavelength)),
                "single",
                &mut warnings,
            );
            (final_sn, single_sn)
        }
    };

    let mut result = GraphResult {
        ccds: payload.ccds,
        groups: payload.groups,
        peak_final_sn,
        peak_single_sn,
        at_wavelength_final_sn,
        at_wavelength_single_sn,
        warnings,
    };
    if let Some(figures) = &request.significant_figures {
        significant_figures::trim_graph_result(&mut result, figures);
    }
    Ok(result)
}

fn require_peak(
    groups: &[crate::models::GraphGroup],
    extract: fn(&[crate::models::GraphGroup], Option<Wavelength>) -> SnExtraction,
) -> Result<SignalToNoise, ItcError> {
    match extract(groups, None) {
        SnExtraction::Success(sn) => Ok(sn),
        SnExtraction::NoData => Err(ItcError::Calculation(
            "no signal-to-noise data in legacy result".to_string(),
        )),
        SnExtraction::Error(message) => Err(ItcError::Calculation(message)),
        // Range outcomes cannot arise without a target wavelength.
        SnExtraction::BelowRange(w) | SnExtraction::AboveRange(w) => Err(ItcError::Calculation(
            format!("unexpected range outcome at {}", w),
        )),
    }
}

/// At-wavelength extraction failures are carried as warnings alongside the
/// graph data rather than failing the request.
fn at_wavelength(
    extraction: SnExtraction,
    which: &str,
    warnings: &mut Vec<String>,
) -> Option<SignalToNoise> {
    match extraction {
        SnExtraction::Success(sn) => Some(sn),
        SnExtraction::BelowRange(w) => {
            warnings.push(format!(
                "{} signal-to-noise at {} is below the computed wavelength range",
                which, w
            ));
            None
        }
        SnExtraction::AboveRange(w) => {
            warnings.push(format!(
                "{} signal-to-noise at {} is above the computed wavelength range",
                which, w
            ));
            None
        }
        SnExtraction::NoData => {
            warnings.push(format!("no {} signal-to-noise data in legacy result", which));
            None
        }
        SnExtraction::Error(message) => {
            warnings.push(message);
            None
        }
    }
}
