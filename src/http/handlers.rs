//! HTTP handlers for the query surface.
//!
//! Each handler validates the coerced input, delegates to the engine, and
//! maps the versioned result onto the response DTO.

use axum::{extract::State, Json};
use serde::Serialize;

use super::error::AppError;
use super::state::AppState;
use crate::routes::inputs::{ImagingTimeInput, SpectroscopyGraphInput, SpectroscopyTimeInput};
use crate::routes::outputs::{
    IntegrationTimeResponse, SpectroscopyGraphResponse, VersionsResponse,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::services::SERVER_VERSION.to_string(),
    })
}

// =============================================================================
// Queries
// =============================================================================

/// GET /versions
///
/// Current server build identifier and upstream data version.
pub async fn versions(State(state): State<AppState>) -> HandlerResult<VersionsResponse> {
    let versions = state.service.versions().await;
    Ok(Json(versions.into()))
}

/// POST /spectroscopy-integration-time
///
/// Exposure plan reaching the requested signal-to-noise for a spectroscopy
/// configuration.
pub async fn spectroscopy_integration_time(
    State(state): State<AppState>,
    Json(input): Json<SpectroscopyTimeInput>,
) -> HandlerResult<IntegrationTimeResponse> {
    let request = input.validate()?;
    let result = state.service.spectroscopy_integration_time(request).await?;
    Ok(Json(result.into()))
}

/// POST /imaging-integration-time
///
/// Exposure plan reaching the requested signal-to-noise for an imaging
/// configuration.
pub async fn imaging_integration_time(
    State(state): State<AppState>,
    Json(input): Json<ImagingTimeInput>,
) -> HandlerResult<IntegrationTimeResponse> {
    let request = input.validate()?;
    let result = state.service.imaging_integration_time(request).await?;
    Ok(Json(result.into()))
}

/// POST /optimized-spectroscopy-graph
///
/// Spectrum-like series, detector readouts, and peak/at-wavelength
/// signal-to-noise for a fixed exposure plan.
pub async fn optimized_spectroscopy_graph(
    State(state): State<AppState>,
    Json(input): Json<SpectroscopyGraphInput>,
) -> HandlerResult<SpectroscopyGraphResponse> {
    let request = input.validate()?;
    let result = state.service.spectroscopy_graph(request).await?;
    Ok(Json(result.into()))
}
