//! Canonical text document handed to the legacy calculator.
//!
//! The legacy numeric kernel runs out of process behind a textual
//! request/response boundary. The document is JSON emitted from plain
//! structs: field order is struct declaration order and float formatting is
//! serde_json's shortest-round-trip form, so the same request always renders
//! to the same bytes. Optional fields are always present (`null` when
//! unset) to keep the document shape fixed.
//!
//! Telescope and wavefront-sensor parameters are not client-selectable; the
//! fixed defaults are emitted with every request.

use serde::Serialize;

use crate::models::{
    ObservingConditions, ObservingMode, SignalToNoise, SourceGeometry, SpectralDefinition,
    SpectralEnergyDistribution, TargetProfile, TimeSpan, Wavelength,
};

/// Mirror coating emitted with every request.
const MIRROR_COATING: &str = "SILVER";
/// Wavefront sensor emitted with every request.
const WAVEFRONT_SENSOR: &str = "OIWFS";

/// Complete calculation request as handed to the legacy kernel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    source: SourceSection,
    observation: ObservationSection,
    conditions: ConditionsSection,
    instrument: InstrumentSection,
    telescope: TelescopeSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceSection {
    geometry: &'static str,
    fwhm_arcsec: Option<f64>,
    spectrum: SpectrumSection,
    redshift: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpectrumSection {
    kind: &'static str,
    library_spectrum: Option<&'static str>,
    temperature_kelvin: Option<f64>,
    power_law_index: Option<f64>,
    brightness_band: Option<&'static str>,
    brightness_value: Option<f64>,
    brightness_unit: Option<&'static str>,
    line_wavelength_nm: Option<f64>,
    line_width_kms: Option<f64>,
    line_flux: Option<f64>,
    continuum: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ObservationSection {
    calculation: &'static str,
    exposures: Option<u32>,
    exposure_time_secs: Option<f64>,
    signal_to_noise: Option<f64>,
    signal_to_noise_at_nm: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionsSection {
    image_quality_arcsec: f64,
    cloud_extinction_mag: f64,
    sky_background: &'static str,
    water_vapor: &'static str,
    air_mass: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentSection {
    instrument: &'static str,
    mode: &'static str,
    grating: Option<String>,
    focal_plane_unit: Option<String>,
    filter: Option<String>,
    central_wavelength_nm: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TelescopeSection {
    mirror_coating: &'static str,
    wavefront_sensor: &'static str,
}

impl LegacyDocument {
    /// Document requesting the spectrum-like graph series for a fixed
    /// exposure plan.
    pub fn for_graphs(
        target: &TargetProfile,
        mode: &ObservingMode,
        conditions: &ObservingConditions,
        exposure_time: TimeSpan,
        exposures: u32,
        signal_to_noise_at: Option<Wavelength>,
    ) -> Self {
        Self {
            source: source_section(target),
            observation: ObservationSection {
                calculation: "GRAPHS",
                exposures: Some(exposures),
                exposure_time_secs: Some(exposure_time.as_seconds()),
                signal_to_noise: None,
                signal_to_noise_at_nm: signal_to_noise_at.map(|w| w.nanometers()),
            },
            conditions: conditions_section(conditions),
            instrument: instrument_section(mode),
            telescope: telescope_section(),
        }
    }

    /// Document requesting an exposure plan that reaches the given
    /// signal-to-noise.
    pub fn for_exposure_time(
        target: &TargetProfile,
        mode: &ObservingMode,
        conditions: &ObservingConditions,
        signal_to_noise: SignalToNoise,
        signal_to_noise_at: Option<Wavelength>,
    ) -> Self {
        Self {
            source: source_section(target),
            observation: ObservationSection {
                calculation: "EXPOSURE_TIME",
                exposures: None,
                exposure_time_secs: None,
                signal_to_noise: Some(signal_to_noise.value()),
                signal_to_noise_at_nm: signal_to_noise_at.map(|w| w.nanometers()),
            },
            conditions: conditions_section(conditions),
            instrument: instrument_section(mode),
            telescope: telescope_section(),
        }
    }

    /// Render the canonical UTF-8 text.
    pub fn render(&self) -> String {
        // The document is plain structs of primitives and Strings;
        // serde_json serialization cannot fail for these types.
        serde_json::to_string(self).expect("legacy document serialization is infallible")
    }
}

fn source_section(target: &TargetProfile) -> SourceSection {
    let (geometry, fwhm_arcsec) = match &target.geometry {
        SourceGeometry::Point => ("POINT", None),
        SourceGeometry::Uniform => ("UNIFORM", None),
        SourceGeometry::Gaussian { fwhm_arcsec } => ("GAUSSIAN", Some(*fwhm_arcsec)),
    };
    SourceSection {
        geometry,
        fwhm_arcsec,
        spectrum: spectrum_section(&target.spectral),
        redshift: target.redshift.value(),
    }
}

fn spectrum_section(spectral: &SpectralDefinition) -> SpectrumSection {
    let mut section = SpectrumSection {
        kind: "",
        library_spectrum: None,
        temperature_kelvin: None,
        power_law_index: None,
        brightness_band: None,
        brightness_value: None,
        brightness_unit: None,
        line_wavelength_nm: None,
        line_width_kms: None,
        line_flux: None,
        continuum: None,
    };
    match spectral {
        SpectralDefinition::BandNormalized { sed, brightness } => {
            match sed {
                SpectralEnergyDistribution::Library(spectrum) => {
                    section.kind = "LIBRARY";
                    section.library_spectrum = Some(spectrum.tag());
                }
                SpectralEnergyDistribution::BlackBody { temperature_kelvin } => {
                    section.kind = "BLACK_BODY";
                    section.temperature_kelvin = Some(*temperature_kelvin);
                }
                SpectralEnergyDistribution::PowerLaw { index } => {
                    section.kind = "POWER_LAW";
                    section.power_law_index = Some(*index);
                }
            }
            section.brightness_band = Some(brightness.band.tag());
            section.brightness_value = Some(brightness.value);
            section.brightness_unit = Some(brightness.unit.tag());
        }
        SpectralDefinition::EmissionLine(line) => {
            section.kind = "EMISSION_LINE";
            section.line_wavelength_nm = Some(line.wavelength.nanometers());
            section.line_width_kms = Some(line.line_width);
            section.line_flux = Some(line.line_flux);
            section.continuum = Some(line.continuum);
        }
    }
    section
}

fn conditions_section(conditions: &ObservingConditions) -> ConditionsSection {
    ConditionsSection {
        image_quality_arcsec: conditions.image_quality.to_arcsec(),
        cloud_extinction_mag: conditions.cloud_extinction.to_magnitudes(),
        sky_background: conditions.sky_background.tag(),
        water_vapor: conditions.water_vapor.tag(),
        air_mass: conditions.air_mass.value(),
    }
}

fn instrument_section(mode: &ObservingMode) -> InstrumentSection {
    match mode {
        ObservingMode::GmosNorthSpectroscopy { grating, fpu, filter, central_wavelength } => {
            InstrumentSection {
                instrument: mode.instrument(),
                mode: "SPECTROSCOPY",
                grating: Some(grating.tag().to_string()),
                focal_plane_unit: Some(fpu.tag()),
                filter: filter.as_ref().map(|f| f.tag().to_string()),
                central_wavelength_nm: Some(central_wavelength.nanometers()),
            }
        }
        ObservingMode::GmosSouthSpectroscopy { grating, fpu, filter, central_wavelength } => {
            InstrumentSection {
                instrument: mode.instrument(),
                mode: "SPECTROSCOPY",
                grating: Some(grating.tag().to_string()),
                focal_plane_unit: Some(fpu.tag()),
                filter: filter.as_ref().map(|f| f.tag().to_string()),
                central_wavelength_nm: Some(central_wavelength.nanometers()),
            }
        }
        ObservingMode::GmosNorthImaging { filter } => InstrumentSection {
            instrument: mode.instrument(),
            mode: "IMAGING",
            grating: None,
            focal_plane_unit: None,
            filter: Some(filter.tag().to_string()),
            central_wavelength_nm: None,
        },
        ObservingMode::GmosSouthImaging { filter } => InstrumentSection {
            instrument: mode.instrument(),
            mode: "IMAGING",
            grating: None,
            focal_plane_unit: None,
            filter: Some(filter.tag().to_string()),
            central_wavelength_nm: None,
        },
    }
}

fn telescope_section() -> TelescopeSection {
    TelescopeSection { mirror_coating: MIRROR_COATING, wavefront_sensor: WAVEFRONT_SENSOR }
}
