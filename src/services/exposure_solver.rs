//! Iterative exposure-time solver.
//!
//! Finds an exposure plan (time, count) whose repeated exposures reach a
//! requested signal-to-noise without saturating the detector. The peak-S/N
//! mode probes the legacy calculator with a trial plan, scales the total
//! integration time by the square of the S/N shortfall, and repeats until
//! the plan stops moving or the iteration cap trips. The at-wavelength mode
//! delegates to the legacy kernel's direct exposure-time calculation, as
//! does imaging.

use std::sync::Arc;

use tracing::debug;

use crate::legacy::{
    CalculatorScheduler, GraphsPayload, LegacyCalculator, LegacyDocument, LegacyResponse,
};
use crate::models::{
    ExposurePlan, ImagingTimeRequest, SignalToNoise, SpectroscopyTimeRequest, TimeSpan,
};

use super::graph_extractor::{self, SnExtraction};

/// Circuit breaker on solver iterations.
pub const MAX_ITERATIONS: u32 = 10;

/// Duration of the initial probe exposure.
const INITIAL_PROBE_SECONDS: i64 = 1200;

/// Exposure count of the initial probe.
const INITIAL_PROBE_COUNT: i64 = 1;

/// Errors surfaced by the solver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// The detector reaches half well depth in under a second; no exposure
    /// plan can avoid saturation.
    #[error("source too bright: detector reaches half well depth in {half_well_seconds:.4} s")]
    SourceTooBright { half_well_seconds: f64 },

    #[error("calculation error: {0}")]
    CalculationError(String),

    /// A solver step produced a non-positive plan.
    #[error("integration time error: non-positive exposure plan ({exposures} x {seconds} s)")]
    NegativeExposure { exposures: i64, seconds: i64 },

    /// The legacy calculator reported a failure.
    #[error("legacy calculator error: {0}")]
    Upstream(String),
}

/// Solver over an injected bridge and scheduler.
pub struct ExposureTimeSolver {
    bridge: Arc<dyn LegacyCalculator>,
    scheduler: Arc<CalculatorScheduler>,
}

impl ExposureTimeSolver {
    pub fn new(bridge: Arc<dyn LegacyCalculator>, scheduler: Arc<CalculatorScheduler>) -> Self {
        Self { bridge, scheduler }
    }

    /// Solve a spectroscopy integration-time request.
    ///
    /// With a specific wavelength the legacy kernel computes the plan in a
    /// single call; the iterative loop serves the peak-S/N mode.
    pub async fn solve_spectroscopy(
        &self,
        request: &SpectroscopyTimeRequest,
    ) -> Result<ExposurePlan, SolverError> {
        match request.signal_to_noise_at {
            Some(_) => {
                let document = LegacyDocument::for_exposure_time(
                    &request.target,
                    &request.mode,
                    &request.conditions,
                    request.signal_to_noise,
                    request.signal_to_noise_at,
                );
                self.direct(document).await
            }
            None => self.solve_peak(request).await,
        }
    }

    /// Solve an imaging integration-time request via the direct legacy path.
    pub async fn solve_imaging(
        &self,
        request: &ImagingTimeRequest,
    ) -> Result<ExposurePlan, SolverError> {
        let document = LegacyDocument::for_exposure_time(
            &request.target,
            &request.mode,
            &request.conditions,
            request.signal_to_noise,
            None,
        );
        self.direct(document).await
    }

    /// Single-call path: the legacy kernel returns the plan itself.
    async fn direct(&self, document: LegacyDocument) -> Result<ExposurePlan, SolverError> {
        let response = self
            .scheduler
            .run(self.bridge.calculate_exposure_time(&document))
            .await;
        let payload = match response {
            LegacyResponse::Success(payload) => payload,
            LegacyResponse::Error(message) => return Err(SolverError::Upstream(message)),
        };

        if payload.exposure_time_secs <= 0.0 || payload.exposures == 0 {
            return Err(SolverError::NegativeExposure {
                exposures: payload.exposures as i64,
                seconds: payload.exposure_time_secs as i64,
            });
        }

        Ok(ExposurePlan {
            exposure_time: TimeSpan::from_seconds(payload.exposure_time_secs)
                .map_err(SolverError::CalculationError)?,
            exposures: payload.exposures,
            total_sn: SignalToNoise::new(payload.signal_to_noise)
                .map_err(SolverError::CalculationError)?,
            single_sn: SignalToNoise::new(payload.single_signal_to_noise)
                .map_err(SolverError::CalculationError)?,
        })
    }

    /// Iterative peak-S/N path.
    async fn solve_peak(&self, request: &SpectroscopyTimeRequest) -> Result<ExposurePlan, SolverError> {
        let target = request.signal_to_noise.value();
        let mut exposures: i64 = INITIAL_PROBE_COUNT;
        let mut seconds: i64 = INITIAL_PROBE_SECONDS;

        let mut payload = self.probe(request, exposures, seconds).await?;

        let half_well_seconds = half_well_time(&payload)?;
        if half_well_seconds < 1.0 {
            return Err(SolverError::SourceTooBright { half_well_seconds });
        }
        // A single exposure may not exceed the initial probe duration nor
        // the half-well time.
        let step_cap_seconds = (INITIAL_PROBE_SECONDS as f64).min(half_well_seconds);

        let mut sn = peak_final_sn(&payload)?;
        let mut iterations = 0u32;

        loop {
            if sn == 0.0 {
                return Err(SolverError::CalculationError("S/N obtained is 0".to_string()));
            }

            // Total integration time needed, scaling by the square of the
            // signal-to-noise shortfall.
            let total_seconds = exposures as f64 * seconds as f64 * (target / sn).powi(2);
            let next_count_f = (total_seconds / step_cap_seconds).ceil();
            let next_time_f = (total_seconds / next_count_f).ceil();

            if next_count_f <= 0.0 || next_time_f <= 0.0 {
                return Err(SolverError::NegativeExposure {
                    exposures: next_count_f as i64,
                    seconds: next_time_f as i64,
                });
            }

            let next_count = next_count_f as i64;
            let next_time = next_time_f as i64;

            if next_count == exposures && (next_time - seconds).abs() <= 1 {
                debug!(exposures = next_count, seconds = next_time, iterations, "solver converged");
                return build_plan(&payload, next_time, next_count, sn);
            }

            iterations += 1;
            if iterations >= MAX_ITERATIONS || next_time_f >= i64::MAX as f64 {
                debug!(exposures = next_count, seconds = next_time, "solver hit iteration cap");
                return build_plan(&payload, next_time, next_count, sn);
            }

            payload = self.probe(request, next_count, next_time).await?;
            sn = peak_final_sn(&payload)?;
            exposures = next_count;
            seconds = next_time;
        }
    }

    async fn probe(
        &self,
        request: &SpectroscopyTimeRequest,
        exposures: i64,
        seconds: i64,
    ) -> Result<GraphsPayload, SolverError> {
        let count = u32::try_from(exposures).map_err(|_| {
            SolverError::CalculationError(format!("exposure count {} out of range", exposures))
        })?;
        let exposure_time =
            TimeSpan::from_whole_seconds(seconds).map_err(SolverError::CalculationError)?;
        let document = LegacyDocument::for_graphs(
            &request.target,
            &request.mode,
            &request.conditions,
            exposure_time,
            count,
            None,
        );
        match self.scheduler.run(self.bridge.calculate_graphs(&document)).await {
            LegacyResponse::Success(payload) => Ok(payload),
            LegacyResponse::Error(message) => Err(SolverError::Upstream(message)),
        }
    }
}

/// Time to half-fill the fullest-filling CCD at the reported peak pixel
/// flux rate. The most saturated CCD constrains the plan.
fn half_well_time(payload: &GraphsPayload) -> Result<f64, SolverError> {
    if payload.ccds.is_empty() {
        return Err(SolverError::CalculationError(
            "legacy result contains no detector data".to_string(),
        ));
    }
    let mut shortest = f64::INFINITY;
    for ccd in &payload.ccds {
        if ccd.peak_pixel_flux > 0.0 {
            shortest = shortest.min(ccd.well_depth / (2.0 * ccd.peak_pixel_flux));
        }
    }
    Ok(shortest)
}

fn peak_final_sn(payload: &GraphsPayload) -> Result<f64, SolverError> {
    match graph_extractor::final_sn_at(&payload.groups, None) {
        SnExtraction::Success(sn) => Ok(sn.value()),
        SnExtraction::NoData => Err(SolverError::CalculationError(
            "no final signal-to-noise data in legacy result".to_string(),
        )),
        SnExtraction::BelowRange(w) => Err(SolverError::CalculationError(format!(
            "requested wavelength {} is below the computed range",
            w
        ))),
        SnExtraction::AboveRange(w) => Err(SolverError::CalculationError(format!(
            "requested wavelength {} is above the computed range",
            w
        ))),
        SnExtraction::Error(message) => Err(SolverError::CalculationError(message)),
    }
}

fn build_plan(
    payload: &GraphsPayload,
    seconds: i64,
    count: i64,
    total_sn: f64,
) -> Result<ExposurePlan, SolverError> {
    let exposures = u32::try_from(count).map_err(|_| {
        SolverError::CalculationError(format!("exposure count {} out of range", count))
    })?;
    let single_sn = match graph_extractor::single_sn_at(&payload.groups, None) {
        SnExtraction::Success(sn) => sn,
        // No single-exposure series: derive from total² = count · single².
        _ => SignalToNoise::new(total_sn / (exposures.max(1) as f64).sqrt())
            .map_err(SolverError::CalculationError)?,
    };
    Ok(ExposurePlan {
        exposure_time: TimeSpan::from_whole_seconds(seconds).map_err(SolverError::CalculationError)?,
        exposures,
        total_sn: SignalToNoise::new(total_sn).map_err(SolverError::CalculationError)?,
        single_sn,
    })
}
