//! Calculation results: graph series, detector readouts, exposure plans.

use serde::{Deserialize, Serialize};

use super::quantities::{SignalToNoise, TimeSpan};

/// Kind of data a series carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesDataType {
    SignalData,
    BackgroundData,
    SingleS2nData,
    FinalS2nData,
    PixSigData,
    PixBackData,
}

/// Kind of graph a series group belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphType {
    SignalGraph,
    S2nGraph,
}

/// One typed series of (wavelength nm, value) samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSeries {
    pub title: String,
    pub series_type: SeriesDataType,
    pub data: Vec<(f64, f64)>,
}

/// A graph: typed collection of series sharing axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub graph_type: GraphType,
    pub series: Vec<GraphSeries>,
}

/// Group of graphs produced by one calculation (typically one per CCD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphGroup {
    pub graphs: Vec<Graph>,
}

/// Detector readout attributes reported per CCD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CcdReadout {
    /// Signal-to-noise of a single exposure.
    pub single_sn: f64,
    /// Signal-to-noise across all exposures.
    pub total_sn: f64,
    /// Peak flux rate in the brightest pixel, electrons per second.
    pub peak_pixel_flux: f64,
    /// Full-well capacity, electrons.
    pub well_depth: f64,
    pub amp_gain: f64,
}

/// Assembled graph result returned to clients and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResult {
    pub ccds: Vec<CcdReadout>,
    pub groups: Vec<GraphGroup>,
    pub peak_final_sn: SignalToNoise,
    pub peak_single_sn: SignalToNoise,
    pub at_wavelength_final_sn: Option<SignalToNoise>,
    pub at_wavelength_single_sn: Option<SignalToNoise>,
    /// Non-fatal problems encountered during assembly, surfaced alongside
    /// the data (for example an at-wavelength lookup outside the computed
    /// range).
    pub warnings: Vec<String>,
}

/// Exposure plan meeting a requested signal-to-noise.
///
/// Within legacy-calculator precision,
/// `total_sn² ≈ exposures · single_sn²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposurePlan {
    pub exposure_time: TimeSpan,
    pub exposures: u32,
    pub total_sn: SignalToNoise,
    pub single_sn: SignalToNoise,
}
