//! Shared stub calculator and request builders for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use itc_rust::legacy::{
    ExposurePayload, GraphsPayload, LegacyCalculator, LegacyDocument, LegacyResponse,
};
use itc_rust::models::{
    AirMassBucket, Band, Brightness, BrightnessUnit, CcdReadout, CloudExtinction, DataVersion,
    FpuSelection, GmosNorthFilter, GmosNorthFpu, GmosNorthGrating, GmosSouthFilter, Graph,
    GraphGroup, GraphSeries, GraphType, ImageQuality, ImagingTimeRequest, ObservingConditions,
    ObservingMode, RadialVelocity, SeriesDataType, SignalToNoise, SignificantFigures,
    SkyBackground, SourceGeometry, SpectralDefinition, SpectralEnergyDistribution,
    SpectroscopyGraphRequest, SpectroscopyTimeRequest, StellarLibrarySpectrum, TargetProfile,
    TimeSpan, WaterVapor, Wavelength,
};

/// Scriptable in-memory calculator with call counters.
///
/// Graph responses are consumed from a script queue; when only one entry
/// remains it repeats for every further call.
pub struct StubCalculator {
    graphs_script: Mutex<VecDeque<LegacyResponse<GraphsPayload>>>,
    exposure_response: Mutex<LegacyResponse<ExposurePayload>>,
    version: Mutex<DataVersion>,
    pub graphs_calls: AtomicUsize,
    pub exposure_calls: AtomicUsize,
}

impl StubCalculator {
    pub fn new() -> Self {
        Self {
            graphs_script: Mutex::new(VecDeque::new()),
            exposure_response: Mutex::new(LegacyResponse::Error(
                "stub: no exposure response scripted".to_string(),
            )),
            version: Mutex::new(DataVersion::new("stub-data-1")),
            graphs_calls: AtomicUsize::new(0),
            exposure_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_graphs(payload: GraphsPayload) -> Self {
        let stub = Self::new();
        stub.script_graphs(vec![LegacyResponse::Success(payload)]);
        stub
    }

    pub fn with_exposure(payload: ExposurePayload) -> Self {
        let stub = Self::new();
        stub.set_exposure(LegacyResponse::Success(payload));
        stub
    }

    pub fn script_graphs(&self, responses: Vec<LegacyResponse<GraphsPayload>>) {
        *self.graphs_script.lock() = responses.into();
    }

    pub fn set_exposure(&self, response: LegacyResponse<ExposurePayload>) {
        *self.exposure_response.lock() = response;
    }

    pub fn set_version(&self, version: &str) {
        *self.version.lock() = DataVersion::new(version);
    }

    pub fn graphs_call_count(&self) -> usize {
        self.graphs_calls.load(Ordering::SeqCst)
    }

    pub fn exposure_call_count(&self) -> usize {
        self.exposure_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LegacyCalculator for StubCalculator {
    async fn calculate_graphs(&self, _document: &LegacyDocument) -> LegacyResponse<GraphsPayload> {
        self.graphs_calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.graphs_script.lock();
        if script.len() > 1 {
            script.pop_front().expect("script is non-empty")
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| LegacyResponse::Error("stub: no graphs scripted".to_string()))
        }
    }

    async fn calculate_exposure_time(
        &self,
        _document: &LegacyDocument,
    ) -> LegacyResponse<ExposurePayload> {
        self.exposure_calls.fetch_add(1, Ordering::SeqCst);
        self.exposure_response.lock().clone()
    }

    async fn data_version(&self) -> anyhow::Result<DataVersion> {
        Ok(self.version.lock().clone())
    }
}

// ============================================================================
// Payload builders
// ============================================================================

pub fn ccd(well_depth: f64, peak_pixel_flux: f64) -> CcdReadout {
    CcdReadout {
        single_sn: 10.0,
        total_sn: 31.6,
        peak_pixel_flux,
        well_depth,
        amp_gain: 1.0,
    }
}

/// A payload with one CCD and final/single S/N series.
pub fn graphs_payload(
    well_depth: f64,
    peak_pixel_flux: f64,
    final_data: Vec<(f64, f64)>,
    single_data: Vec<(f64, f64)>,
) -> GraphsPayload {
    GraphsPayload {
        ccds: vec![ccd(well_depth, peak_pixel_flux)],
        groups: vec![GraphGroup {
            graphs: vec![Graph {
                graph_type: GraphType::S2nGraph,
                series: vec![
                    GraphSeries {
                        title: "Single S/N".to_string(),
                        series_type: SeriesDataType::SingleS2nData,
                        data: single_data,
                    },
                    GraphSeries {
                        title: "Final S/N".to_string(),
                        series_type: SeriesDataType::FinalS2nData,
                        data: final_data,
                    },
                ],
            }],
        }],
    }
}

pub fn exposure_payload(seconds: f64, exposures: u32, sn: f64, single_sn: f64) -> ExposurePayload {
    ExposurePayload {
        exposure_time_secs: seconds,
        exposures,
        signal_to_noise: sn,
        single_signal_to_noise: single_sn,
    }
}

// ============================================================================
// Request builders
// ============================================================================

pub fn nm(value: f64) -> Wavelength {
    Wavelength::from_nanometers(value).unwrap()
}

pub fn test_target() -> TargetProfile {
    TargetProfile {
        geometry: SourceGeometry::Point,
        spectral: SpectralDefinition::BandNormalized {
            sed: SpectralEnergyDistribution::Library(StellarLibrarySpectrum::G2V),
            brightness: Brightness { band: Band::R, value: 18.5, unit: BrightnessUnit::VegaMagnitude },
        },
        redshift: RadialVelocity::from_meters_per_second(30_000.0).unwrap().to_redshift(),
    }
}

pub fn test_conditions() -> ObservingConditions {
    ObservingConditions {
        image_quality: ImageQuality::PointEight,
        cloud_extinction: CloudExtinction::PointThree,
        sky_background: SkyBackground::Dark,
        water_vapor: WaterVapor::Median,
        air_mass: AirMassBucket::from_air_mass(1.2).unwrap(),
    }
}

/// The spectroscopy configuration of the end-to-end scenarios: B1200
/// grating, 0.25″ long slit, g′ filter, 60 nm central wavelength.
pub fn test_spectroscopy_mode() -> ObservingMode {
    ObservingMode::GmosNorthSpectroscopy {
        grating: GmosNorthGrating::B1200G5301,
        fpu: FpuSelection::Builtin(GmosNorthFpu::LongSlit025),
        filter: Some(GmosNorthFilter::GPrime),
        central_wavelength: nm(60.0),
    }
}

pub fn spectroscopy_time_request(
    signal_to_noise: f64,
    at: Option<Wavelength>,
) -> SpectroscopyTimeRequest {
    SpectroscopyTimeRequest {
        target: test_target(),
        mode: test_spectroscopy_mode(),
        conditions: test_conditions(),
        signal_to_noise: SignalToNoise::new(signal_to_noise).unwrap(),
        signal_to_noise_at: at,
    }
}

pub fn imaging_time_request(signal_to_noise: f64) -> ImagingTimeRequest {
    ImagingTimeRequest {
        target: test_target(),
        mode: ObservingMode::GmosSouthImaging { filter: GmosSouthFilter::RPrime },
        conditions: test_conditions(),
        signal_to_noise: SignalToNoise::new(signal_to_noise).unwrap(),
    }
}

pub fn graph_request(
    exposure_seconds: f64,
    exposures: u32,
    at: Option<Wavelength>,
    significant_figures: Option<SignificantFigures>,
) -> SpectroscopyGraphRequest {
    SpectroscopyGraphRequest {
        target: test_target(),
        mode: test_spectroscopy_mode(),
        conditions: test_conditions(),
        exposure_time: TimeSpan::from_seconds(exposure_seconds).unwrap(),
        exposures,
        signal_to_noise_at: at,
        significant_figures,
    }
}
