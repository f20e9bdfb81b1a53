//! Calculation requests, normalised and ready for content addressing.
//!
//! A request is a pure value: two logically equal requests serialize to the
//! same bytes, which the cache layer relies on for key derivation. All
//! coercion and validation happens in the input layer before these types are
//! constructed.

use serde::{Deserialize, Serialize};

use super::conditions::ObservingConditions;
use super::mode::ObservingMode;
use super::quantities::{SignalToNoise, TimeSpan, Wavelength};
use super::target::TargetProfile;

/// Significant-figure trimming to apply to graph outputs. An absent axis
/// means no trim on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignificantFigures {
    pub x_axis: Option<u32>,
    pub y_axis: Option<u32>,
    pub ccd: Option<u32>,
}

/// Spectroscopy integration-time request: find an exposure plan that reaches
/// the requested signal-to-noise, optionally at a specific wavelength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectroscopyTimeRequest {
    pub target: TargetProfile,
    pub mode: ObservingMode,
    pub conditions: ObservingConditions,
    pub signal_to_noise: SignalToNoise,
    pub signal_to_noise_at: Option<Wavelength>,
}

/// Imaging integration-time request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingTimeRequest {
    pub target: TargetProfile,
    pub mode: ObservingMode,
    pub conditions: ObservingConditions,
    pub signal_to_noise: SignalToNoise,
}

/// Spectroscopy graph request: compute the spectrum-like series for a fixed
/// exposure plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectroscopyGraphRequest {
    pub target: TargetProfile,
    pub mode: ObservingMode,
    pub conditions: ObservingConditions,
    pub exposure_time: TimeSpan,
    pub exposures: u32,
    pub signal_to_noise_at: Option<Wavelength>,
    pub significant_figures: Option<SignificantFigures>,
}
