//! Response types for the query surface.
//!
//! Thin mapping from the orchestrator's versioned results onto the wire
//! field names.

use serde::Serialize;

use crate::models::{CcdReadout, ExposurePlan, GraphGroup, GraphResult};
use crate::services::orchestrator::{ServiceVersions, Versioned};

/// `versions` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsResponse {
    pub server_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
}

impl From<ServiceVersions> for VersionsResponse {
    fn from(versions: ServiceVersions) -> Self {
        Self {
            server_version: versions.server_version,
            data_version: versions.data_version.map(|v| v.as_str().to_string()),
        }
    }
}

/// Exposure time as the wire's duration object.
#[derive(Debug, Clone, Serialize)]
pub struct ExposureTimeDto {
    pub seconds: f64,
}

/// Integration-time response shared by the spectroscopy and imaging queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationTimeResponse {
    pub server_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    pub exposure_time: ExposureTimeDto,
    pub exposures: u32,
    pub signal_to_noise: f64,
    pub single_signal_to_noise: f64,
}

impl From<Versioned<ExposurePlan>> for IntegrationTimeResponse {
    fn from(versioned: Versioned<ExposurePlan>) -> Self {
        let plan = versioned.result;
        Self {
            server_version: versioned.server_version,
            data_version: versioned.data_version.map(|v| v.as_str().to_string()),
            exposure_time: ExposureTimeDto { seconds: plan.exposure_time.as_seconds() },
            exposures: plan.exposures,
            signal_to_noise: plan.total_sn.value(),
            single_signal_to_noise: plan.single_sn.value(),
        }
    }
}

/// `optimizedSpectroscopyGraph` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectroscopyGraphResponse {
    pub server_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    pub ccds: Vec<CcdReadout>,
    pub groups: Vec<GraphGroup>,
    pub peak_final_sn: f64,
    pub peak_single_sn: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at_wavelength_final_sn: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at_wavelength_single_sn: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<Versioned<GraphResult>> for SpectroscopyGraphResponse {
    fn from(versioned: Versioned<GraphResult>) -> Self {
        let result = versioned.result;
        Self {
            server_version: versioned.server_version,
            data_version: versioned.data_version.map(|v| v.as_str().to_string()),
            ccds: result.ccds,
            groups: result.groups,
            peak_final_sn: result.peak_final_sn.value(),
            peak_single_sn: result.peak_single_sn.value(),
            at_wavelength_final_sn: result.at_wavelength_final_sn.map(|sn| sn.value()),
            at_wavelength_single_sn: result.at_wavelength_single_sn.map(|sn| sn.value()),
            warnings: result.warnings,
        }
    }
}
