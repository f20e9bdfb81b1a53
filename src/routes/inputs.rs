//! Typed inputs for the query surface.
//!
//! Every field is coerced and validated here before the core sees it.
//! Validation problems are collected, not short-circuited: a request with a
//! bad wavelength and a bad air-mass range reports both.

use serde::Deserialize;

use crate::models::{
    AirMassBucket, Band, Brightness, BrightnessUnit, CloudExtinction, CustomSlitWidth,
    EmissionLine, FpuSelection, GmosNorthFilter, GmosNorthFpu, GmosNorthGrating, GmosSouthFilter,
    GmosSouthFpu, GmosSouthGrating, ImageQuality, ImagingTimeRequest, ObservingConditions,
    ObservingMode, RadialVelocity, SignalToNoise, SignificantFigures, SkyBackground,
    SourceGeometry, SpectralDefinition, SpectralEnergyDistribution, SpectroscopyGraphRequest,
    SpectroscopyTimeRequest, StellarLibrarySpectrum, TargetProfile, TimeSpan, WaterVapor,
    Wavelength,
};

/// Collected validation problems for one request.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid input: {}", .problems.join("; "))]
pub struct InputErrors {
    pub problems: Vec<String>,
}

fn collect<T>(result: Result<T, String>, problems: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(problem) => {
            problems.push(problem);
            None
        }
    }
}

fn exactly_one(field: &str, set: &[bool]) -> Result<(), String> {
    match set.iter().filter(|present| **present).count() {
        1 => Ok(()),
        0 => Err(format!("{}: one unit field must be given", field)),
        _ => Err(format!("{}: exactly one unit field must be given", field)),
    }
}

// ============================================================================
// Unit-tagged scalars
// ============================================================================

/// Wavelength with exactly one unit field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WavelengthInput {
    #[serde(default)]
    pub picometers: Option<i64>,
    #[serde(default)]
    pub angstroms: Option<f64>,
    #[serde(default)]
    pub nanometers: Option<f64>,
    #[serde(default)]
    pub micrometers: Option<f64>,
}

impl WavelengthInput {
    pub fn resolve(&self, field: &str) -> Result<Wavelength, String> {
        exactly_one(
            field,
            &[
                self.picometers.is_some(),
                self.angstroms.is_some(),
                self.nanometers.is_some(),
                self.micrometers.is_some(),
            ],
        )?;
        let resolved = if let Some(pm) = self.picometers {
            Wavelength::from_picometers(pm)
        } else if let Some(a) = self.angstroms {
            Wavelength::from_angstroms(a)
        } else if let Some(nm) = self.nanometers {
            Wavelength::from_nanometers(nm)
        } else if let Some(um) = self.micrometers {
            Wavelength::from_micrometers(um)
        } else {
            unreachable!("exactly_one guarantees a unit field")
        };
        resolved.map_err(|e| format!("{}: {}", field, e))
    }
}

/// Radial velocity with exactly one unit field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RadialVelocityInput {
    #[serde(default)]
    pub centimeters_per_second: Option<i64>,
    #[serde(default)]
    pub meters_per_second: Option<f64>,
    #[serde(default)]
    pub kilometers_per_second: Option<f64>,
}

impl RadialVelocityInput {
    pub fn resolve(&self) -> Result<RadialVelocity, String> {
        exactly_one(
            "radialVelocity",
            &[
                self.centimeters_per_second.is_some(),
                self.meters_per_second.is_some(),
                self.kilometers_per_second.is_some(),
            ],
        )?;
        let meters_per_second = if let Some(cm) = self.centimeters_per_second {
            cm as f64 / 100.0
        } else if let Some(m) = self.meters_per_second {
            m
        } else if let Some(km) = self.kilometers_per_second {
            km * 1_000.0
        } else {
            unreachable!("exactly_one guarantees a unit field")
        };
        RadialVelocity::from_meters_per_second(meters_per_second)
            .map_err(|e| format!("radialVelocity: {}", e))
    }
}

/// Duration with exactly one unit field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExposureTimeInput {
    #[serde(default)]
    pub milliseconds: Option<f64>,
    #[serde(default)]
    pub seconds: Option<f64>,
    #[serde(default)]
    pub minutes: Option<f64>,
    #[serde(default)]
    pub hours: Option<f64>,
}

impl ExposureTimeInput {
    pub fn resolve(&self) -> Result<TimeSpan, String> {
        exactly_one(
            "exposureTime",
            &[
                self.milliseconds.is_some(),
                self.seconds.is_some(),
                self.minutes.is_some(),
                self.hours.is_some(),
            ],
        )?;
        let seconds = if let Some(ms) = self.milliseconds {
            ms / 1_000.0
        } else if let Some(s) = self.seconds {
            s
        } else if let Some(m) = self.minutes {
            m * 60.0
        } else if let Some(h) = self.hours {
            h * 3_600.0
        } else {
            unreachable!("exactly_one guarantees a unit field")
        };
        if !(seconds > 0.0) {
            return Err(format!("exposureTime: must be positive, got {} s", seconds));
        }
        TimeSpan::from_seconds(seconds).map_err(|e| format!("exposureTime: {}", e))
    }
}

/// Angle with exactly one unit field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AngleInput {
    #[serde(default)]
    pub microarcseconds: Option<i64>,
    #[serde(default)]
    pub milliarcseconds: Option<f64>,
    #[serde(default)]
    pub arcseconds: Option<f64>,
}

impl AngleInput {
    pub fn resolve_arcsec(&self, field: &str) -> Result<f64, String> {
        exactly_one(
            field,
            &[
                self.microarcseconds.is_some(),
                self.milliarcseconds.is_some(),
                self.arcseconds.is_some(),
            ],
        )?;
        let arcsec = if let Some(uas) = self.microarcseconds {
            uas as f64 / 1e6
        } else if let Some(mas) = self.milliarcseconds {
            mas / 1e3
        } else if let Some(arcsec) = self.arcseconds {
            arcsec
        } else {
            unreachable!("exactly_one guarantees a unit field")
        };
        if !(arcsec > 0.0 && arcsec.is_finite()) {
            return Err(format!("{}: must be a positive angle, got {}″", field, arcsec));
        }
        Ok(arcsec)
    }
}

// ============================================================================
// Source profile
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SedInput {
    #[serde(default)]
    pub stellar_library: Option<StellarLibrarySpectrum>,
    #[serde(default)]
    pub black_body_temp_k: Option<f64>,
    #[serde(default)]
    pub power_law_index: Option<f64>,
}

impl SedInput {
    fn resolve(&self) -> Result<SpectralEnergyDistribution, String> {
        exactly_one(
            "sed",
            &[
                self.stellar_library.is_some(),
                self.black_body_temp_k.is_some(),
                self.power_law_index.is_some(),
            ],
        )?;
        if let Some(spectrum) = self.stellar_library {
            Ok(SpectralEnergyDistribution::Library(spectrum))
        } else if let Some(temperature_kelvin) = self.black_body_temp_k {
            if !(temperature_kelvin > 0.0 && temperature_kelvin.is_finite()) {
                return Err(format!(
                    "sed.blackBodyTempK: must be a positive temperature, got {}",
                    temperature_kelvin
                ));
            }
            Ok(SpectralEnergyDistribution::BlackBody { temperature_kelvin })
        } else if let Some(index) = self.power_law_index {
            if !index.is_finite() {
                return Err(format!("sed.powerLawIndex: must be finite, got {}", index));
            }
            Ok(SpectralEnergyDistribution::PowerLaw { index })
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrightnessInput {
    pub band: Band,
    pub value: f64,
    pub units: BrightnessUnit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BandNormalizedInput {
    pub sed: SedInput,
    pub brightnesses: Vec<BrightnessInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmissionLinesInput {
    pub wavelength: WavelengthInput,
    /// Line width in km/s.
    pub line_width: f64,
    /// Integrated line flux in W/m².
    pub line_flux: f64,
    /// Continuum flux density in W/m²/µm.
    pub continuum: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpectralDefinitionInput {
    #[serde(default)]
    pub band_normalized: Option<BandNormalizedInput>,
    #[serde(default)]
    pub emission_lines: Option<EmissionLinesInput>,
}

impl SpectralDefinitionInput {
    /// Resolve against the request's photometric band: a band-normalized
    /// definition must carry a brightness entry for it.
    fn resolve(&self, band: Band) -> Result<SpectralDefinition, String> {
        exactly_one(
            "spectralDefinition",
            &[self.band_normalized.is_some(), self.emission_lines.is_some()],
        )?;
        if let Some(normalized) = &self.band_normalized {
            let sed = normalized.sed.resolve()?;
            let entry = normalized
                .brightnesses
                .iter()
                .find(|brightness| brightness.band == band)
                .ok_or_else(|| {
                    format!("brightnesses: no entry for requested band {}", band.tag())
                })?;
            if !entry.value.is_finite() {
                return Err(format!("brightnesses: value for band {} must be finite", band.tag()));
            }
            Ok(SpectralDefinition::BandNormalized {
                sed,
                brightness: Brightness { band, value: entry.value, unit: entry.units },
            })
        } else if let Some(lines) = &self.emission_lines {
            let wavelength = lines.wavelength.resolve("emissionLines.wavelength")?;
            if !(lines.line_width > 0.0 && lines.line_width.is_finite()) {
                return Err(format!(
                    "emissionLines.lineWidth: must be positive, got {}",
                    lines.line_width
                ));
            }
            if !(lines.line_flux > 0.0 && lines.line_flux.is_finite()) {
                return Err(format!(
                    "emissionLines.lineFlux: must be positive, got {}",
                    lines.line_flux
                ));
            }
            if !(lines.continuum >= 0.0 && lines.continuum.is_finite()) {
                return Err(format!(
                    "emissionLines.continuum: must be non-negative, got {}",
                    lines.continuum
                ));
            }
            Ok(SpectralDefinition::EmissionLine(EmissionLine {
                wavelength,
                line_width: lines.line_width,
                line_flux: lines.line_flux,
                continuum: lines.continuum,
            }))
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GaussianInput {
    pub fwhm: AngleInput,
    pub spectral_definition: SpectralDefinitionInput,
}

/// Source profile: exactly one geometry variant, each carrying its spectral
/// definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceProfileInput {
    #[serde(default)]
    pub point: Option<SpectralDefinitionInput>,
    #[serde(default)]
    pub uniform: Option<SpectralDefinitionInput>,
    #[serde(default)]
    pub gaussian: Option<GaussianInput>,
}

impl SourceProfileInput {
    fn resolve(&self, band: Band) -> Result<(SourceGeometry, SpectralDefinition), String> {
        exactly_one(
            "sourceProfile",
            &[self.point.is_some(), self.uniform.is_some(), self.gaussian.is_some()],
        )?;
        if let Some(spectral) = &self.point {
            Ok((SourceGeometry::Point, spectral.resolve(band)?))
        } else if let Some(spectral) = &self.uniform {
            Ok((SourceGeometry::Uniform, spectral.resolve(band)?))
        } else if let Some(gaussian) = &self.gaussian {
            let fwhm_arcsec = gaussian.fwhm.resolve_arcsec("sourceProfile.gaussian.fwhm")?;
            Ok((
                SourceGeometry::Gaussian { fwhm_arcsec },
                gaussian.spectral_definition.resolve(band)?,
            ))
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

// ============================================================================
// Constraints
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AirmassRangeInput {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HourAngleRangeInput {
    pub min_hours: f64,
    pub max_hours: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElevationRangeInput {
    #[serde(default)]
    pub airmass_range: Option<AirmassRangeInput>,
    #[serde(default)]
    pub hour_angle_range: Option<HourAngleRangeInput>,
}

impl ElevationRangeInput {
    fn resolve(&self) -> Result<AirMassBucket, String> {
        exactly_one(
            "constraints.elevationRange",
            &[self.airmass_range.is_some(), self.hour_angle_range.is_some()],
        )?;
        if let Some(range) = &self.airmass_range {
            if range.max < range.min {
                return Err(format!(
                    "constraints.elevationRange.airmassRange: max {} is below min {}",
                    range.max, range.min
                ));
            }
            // The worst (largest) air mass of the range drives the tables.
            AirMassBucket::from_air_mass(range.max)
                .map_err(|e| format!("constraints.elevationRange.airmassRange: {}", e))
        } else if let Some(range) = &self.hour_angle_range {
            if range.max_hours < range.min_hours {
                return Err(format!(
                    "constraints.elevationRange.hourAngleRange: maxHours {} is below minHours {}",
                    range.max_hours, range.min_hours
                ));
            }
            // Hour-angle scheduling has no direct air-mass equivalent; use
            // the most conservative bucket.
            Ok(AirMassBucket::TwoPointZero)
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConstraintsInput {
    pub image_quality: ImageQuality,
    pub cloud_extinction: CloudExtinction,
    pub sky_background: SkyBackground,
    pub water_vapor: WaterVapor,
    pub elevation_range: ElevationRangeInput,
}

impl ConstraintsInput {
    fn resolve(&self) -> Result<ObservingConditions, String> {
        Ok(ObservingConditions {
            image_quality: self.image_quality,
            cloud_extinction: self.cloud_extinction,
            sky_background: self.sky_background,
            water_vapor: self.water_vapor,
            air_mass: self.elevation_range.resolve()?,
        })
    }
}

// ============================================================================
// Instrument mode
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomMaskInput {
    pub slit_width: CustomSlitWidth,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosNorthFpuInput {
    #[serde(default)]
    pub builtin: Option<GmosNorthFpu>,
    #[serde(default)]
    pub custom_mask: Option<CustomMaskInput>,
}

impl GmosNorthFpuInput {
    fn resolve(&self) -> Result<FpuSelection<GmosNorthFpu>, String> {
        exactly_one("mode.fpu", &[self.builtin.is_some(), self.custom_mask.is_some()])?;
        if let Some(fpu) = self.builtin {
            Ok(FpuSelection::Builtin(fpu))
        } else if let Some(mask) = &self.custom_mask {
            Ok(FpuSelection::CustomMask { slit_width: mask.slit_width })
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosSouthFpuInput {
    #[serde(default)]
    pub builtin: Option<GmosSouthFpu>,
    #[serde(default)]
    pub custom_mask: Option<CustomMaskInput>,
}

impl GmosSouthFpuInput {
    fn resolve(&self) -> Result<FpuSelection<GmosSouthFpu>, String> {
        exactly_one("mode.fpu", &[self.builtin.is_some(), self.custom_mask.is_some()])?;
        if let Some(fpu) = self.builtin {
            Ok(FpuSelection::Builtin(fpu))
        } else if let Some(mask) = &self.custom_mask {
            Ok(FpuSelection::CustomMask { slit_width: mask.slit_width })
        } else {
            unreachable!("exactly_one guarantees a variant field")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosNSpectroscopyInput {
    pub grating: GmosNorthGrating,
    pub fpu: GmosNorthFpuInput,
    #[serde(default)]
    pub filter: Option<GmosNorthFilter>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosSSpectroscopyInput {
    pub grating: GmosSouthGrating,
    pub fpu: GmosSouthFpuInput,
    #[serde(default)]
    pub filter: Option<GmosSouthFilter>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosNImagingInput {
    pub filter: GmosNorthFilter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmosSImagingInput {
    pub filter: GmosSouthFilter,
}

/// Instrument mode: exactly one variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InstrumentModeInput {
    #[serde(default)]
    pub gmos_n_spectroscopy: Option<GmosNSpectroscopyInput>,
    #[serde(default)]
    pub gmos_s_spectroscopy: Option<GmosSSpectroscopyInput>,
    #[serde(default)]
    pub gmos_n_imaging: Option<GmosNImagingInput>,
    #[serde(default)]
    pub gmos_s_imaging: Option<GmosSImagingInput>,
}

impl InstrumentModeInput {
    fn check_exactly_one(&self) -> Result<(), String> {
        exactly_one(
            "mode",
            &[
                self.gmos_n_spectroscopy.is_some(),
                self.gmos_s_spectroscopy.is_some(),
                self.gmos_n_imaging.is_some(),
                self.gmos_s_imaging.is_some(),
            ],
        )
    }

    /// Resolve for a spectroscopy query; the central wavelength comes from
    /// the request's `wavelength` field.
    fn resolve_spectroscopy(&self, central_wavelength: Wavelength) -> Result<ObservingMode, String> {
        self.check_exactly_one()?;
        if let Some(input) = &self.gmos_n_spectroscopy {
            Ok(ObservingMode::GmosNorthSpectroscopy {
                grating: input.grating,
                fpu: input.fpu.resolve()?,
                filter: input.filter,
                central_wavelength,
            })
        } else if let Some(input) = &self.gmos_s_spectroscopy {
            Ok(ObservingMode::GmosSouthSpectroscopy {
                grating: input.grating,
                fpu: input.fpu.resolve()?,
                filter: input.filter,
                central_wavelength,
            })
        } else {
            Err("mode: a spectroscopy query requires a spectroscopy mode".to_string())
        }
    }

    /// Resolve for an imaging query.
    fn resolve_imaging(&self) -> Result<ObservingMode, String> {
        self.check_exactly_one()?;
        if let Some(input) = &self.gmos_n_imaging {
            Ok(ObservingMode::GmosNorthImaging { filter: input.filter })
        } else if let Some(input) = &self.gmos_s_imaging {
            Ok(ObservingMode::GmosSouthImaging { filter: input.filter })
        } else {
            Err("mode: an imaging query requires an imaging mode".to_string())
        }
    }
}

// ============================================================================
// Significant figures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignificantFiguresInput {
    #[serde(default)]
    pub x_axis: Option<u32>,
    #[serde(default)]
    pub y_axis: Option<u32>,
    #[serde(default)]
    pub ccd: Option<u32>,
}

impl SignificantFiguresInput {
    fn resolve(&self) -> Result<SignificantFigures, String> {
        for (name, figure) in
            [("xAxis", self.x_axis), ("yAxis", self.y_axis), ("ccd", self.ccd)]
        {
            if figure == Some(0) {
                return Err(format!("significantFigures.{}: must be positive", name));
            }
        }
        Ok(SignificantFigures { x_axis: self.x_axis, y_axis: self.y_axis, ccd: self.ccd })
    }
}

// ============================================================================
// Query inputs
// ============================================================================

fn resolve_signal_to_noise(value: f64) -> Result<SignalToNoise, String> {
    if !(value > 0.0) {
        return Err(format!("signalToNoise: must be positive, got {}", value));
    }
    SignalToNoise::new(value).map_err(|e| format!("signalToNoise: {}", e))
}

fn resolve_target(
    source_profile: &SourceProfileInput,
    band: Band,
    radial_velocity: &RadialVelocityInput,
    problems: &mut Vec<String>,
) -> Option<TargetProfile> {
    let redshift = collect(radial_velocity.resolve(), problems).map(|rv| rv.to_redshift());
    let resolved = collect(source_profile.resolve(band), problems);
    match (resolved, redshift) {
        (Some((geometry, spectral)), Some(redshift)) => {
            Some(TargetProfile { geometry, spectral, redshift })
        }
        _ => None,
    }
}

fn finish<T>(problems: Vec<String>, value: Option<T>) -> Result<T, InputErrors> {
    match value {
        Some(value) if problems.is_empty() => Ok(value),
        _ => {
            let mut problems = problems;
            if problems.is_empty() {
                problems.push("invalid input".to_string());
            }
            Err(InputErrors { problems })
        }
    }
}

/// Input to `spectroscopyIntegrationTime`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpectroscopyTimeInput {
    pub wavelength: WavelengthInput,
    pub signal_to_noise: f64,
    #[serde(default)]
    pub signal_to_noise_at: Option<WavelengthInput>,
    pub source_profile: SourceProfileInput,
    pub band: Band,
    pub radial_velocity: RadialVelocityInput,
    pub constraints: ConstraintsInput,
    pub mode: InstrumentModeInput,
}

impl SpectroscopyTimeInput {
    pub fn validate(self) -> Result<SpectroscopyTimeRequest, InputErrors> {
        let mut problems = Vec::new();

        let central = collect(self.wavelength.resolve("wavelength"), &mut problems);
        let signal_to_noise = collect(resolve_signal_to_noise(self.signal_to_noise), &mut problems);
        let signal_to_noise_at = match &self.signal_to_noise_at {
            None => None,
            Some(input) => collect(input.resolve("signalToNoiseAt"), &mut problems),
        };
        let target =
            resolve_target(&self.source_profile, self.band, &self.radial_velocity, &mut problems);
        let conditions = collect(self.constraints.resolve(), &mut problems);
        let mode = central
            .and_then(|central| collect(self.mode.resolve_spectroscopy(central), &mut problems));

        let request = match (target, mode, conditions, signal_to_noise) {
            (Some(target), Some(mode), Some(conditions), Some(signal_to_noise)) => {
                Some(SpectroscopyTimeRequest {
                    target,
                    mode,
                    conditions,
                    signal_to_noise,
                    signal_to_noise_at,
                })
            }
            _ => None,
        };
        finish(problems, request)
    }
}

/// Input to `imagingIntegrationTime`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImagingTimeInput {
    pub signal_to_noise: f64,
    pub source_profile: SourceProfileInput,
    pub band: Band,
    pub radial_velocity: RadialVelocityInput,
    pub constraints: ConstraintsInput,
    pub mode: InstrumentModeInput,
}

impl ImagingTimeInput {
    pub fn validate(self) -> Result<ImagingTimeRequest, InputErrors> {
        let mut problems = Vec::new();

        let signal_to_noise = collect(resolve_signal_to_noise(self.signal_to_noise), &mut problems);
        let target =
            resolve_target(&self.source_profile, self.band, &self.radial_velocity, &mut problems);
        let conditions = collect(self.constraints.resolve(), &mut problems);
        let mode = collect(self.mode.resolve_imaging(), &mut problems);

        let request = match (target, mode, conditions, signal_to_noise) {
            (Some(target), Some(mode), Some(conditions), Some(signal_to_noise)) => {
                Some(ImagingTimeRequest { target, mode, conditions, signal_to_noise })
            }
            _ => None,
        };
        finish(problems, request)
    }
}

/// Input to `optimizedSpectroscopyGraph`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpectroscopyGraphInput {
    pub wavelength: WavelengthInput,
    pub exposure_time: ExposureTimeInput,
    pub exposures: u32,
    #[serde(default)]
    pub signal_to_noise_at: Option<WavelengthInput>,
    pub source_profile: SourceProfileInput,
    pub band: Band,
    pub radial_velocity: RadialVelocityInput,
    pub constraints: ConstraintsInput,
    pub mode: InstrumentModeInput,
    #[serde(default)]
    pub significant_figures: Option<SignificantFiguresInput>,
}

impl SpectroscopyGraphInput {
    pub fn validate(self) -> Result<SpectroscopyGraphRequest, InputErrors> {
        let mut problems = Vec::new();

        let central = collect(self.wavelength.resolve("wavelength"), &mut problems);
        let exposure_time = collect(self.exposure_time.resolve(), &mut problems);
        if self.exposures == 0 {
            problems.push("exposures: must be positive".to_string());
        }
        let signal_to_noise_at = match &self.signal_to_noise_at {
            None => None,
            Some(input) => collect(input.resolve("signalToNoiseAt"), &mut problems),
        };
        let target =
            resolve_target(&self.source_profile, self.band, &self.radial_velocity, &mut problems);
        let conditions = collect(self.constraints.resolve(), &mut problems);
        let mode = central
            .and_then(|central| collect(self.mode.resolve_spectroscopy(central), &mut problems));
        let significant_figures = match &self.significant_figures {
            None => None,
            Some(input) => collect(input.resolve(), &mut problems),
        };

        let request = match (target, mode, conditions, exposure_time) {
            (Some(target), Some(mode), Some(conditions), Some(exposure_time))
                if self.exposures > 0 =>
            {
                Some(SpectroscopyGraphRequest {
                    target,
                    mode,
                    conditions,
                    exposure_time,
                    exposures: self.exposures,
                    signal_to_noise_at,
                    significant_figures,
                })
            }
            _ => None,
        };
        finish(problems, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn valid_spectroscopy_json() -> serde_json::Value {
        serde_json::json!({
            "wavelength": {"nanometers": 520.0},
            "signalToNoise": 100.0,
            "sourceProfile": {
                "point": {
                    "bandNormalized": {
                        "sed": {"stellarLibrary": "G2V"},
                        "brightnesses": [
                            {"band": "R", "value": 18.5, "units": "VEGA_MAGNITUDE"}
                        ]
                    }
                }
            },
            "band": "R",
            "radialVelocity": {"kilometersPerSecond": 30.0},
            "constraints": {
                "imageQuality": "POINT_EIGHT",
                "cloudExtinction": "POINT_THREE",
                "skyBackground": "DARK",
                "waterVapor": "MEDIAN",
                "elevationRange": {"airmassRange": {"min": 1.0, "max": 1.4}}
            },
            "mode": {
                "gmosNSpectroscopy": {
                    "grating": "B1200_G5301",
                    "fpu": {"builtin": "LONG_SLIT_0_25"},
                    "filter": "G_PRIME"
                }
            }
        })
    }

    fn parse_spectroscopy(value: serde_json::Value) -> SpectroscopyTimeInput {
        serde_json::from_value(value).expect("input deserializes")
    }

    #[test]
    fn test_valid_spectroscopy_input_resolves() {
        let request = parse_spectroscopy(valid_spectroscopy_json()).validate().unwrap();
        assert_eq!(request.signal_to_noise.value(), 100.0);
        assert!(request.signal_to_noise_at.is_none());
        assert_eq!(request.conditions.air_mass, AirMassBucket::OnePointFive);
        match &request.mode {
            ObservingMode::GmosNorthSpectroscopy { grating, central_wavelength, .. } => {
                assert_eq!(*grating, GmosNorthGrating::B1200G5301);
                assert_relative_eq!(central_wavelength.nanometers(), 520.0);
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_two_wavelength_units_rejected() {
        let mut value = valid_spectroscopy_json();
        value["wavelength"] = serde_json::json!({"nanometers": 520.0, "angstroms": 5200.0});
        let errors = parse_spectroscopy(value).validate().unwrap_err();
        assert!(errors.problems.iter().any(|p| p.contains("wavelength")));
    }

    #[test]
    fn test_airmass_max_below_min_rejected() {
        let mut value = valid_spectroscopy_json();
        value["constraints"]["elevationRange"] =
            serde_json::json!({"airmassRange": {"min": 1.8, "max": 1.2}});
        let errors = parse_spectroscopy(value).validate().unwrap_err();
        assert!(errors.problems.iter().any(|p| p.contains("airmassRange")));
    }

    #[test]
    fn test_problems_are_collected_not_short_circuited() {
        let mut value = valid_spectroscopy_json();
        value["signalToNoise"] = serde_json::json!(-3.0);
        value["constraints"]["elevationRange"] =
            serde_json::json!({"airmassRange": {"min": 1.8, "max": 1.2}});
        let errors = parse_spectroscopy(value).validate().unwrap_err();
        assert!(errors.problems.len() >= 2, "expected both problems: {:?}", errors.problems);
    }

    #[test]
    fn test_missing_brightness_for_band_rejected() {
        let mut value = valid_spectroscopy_json();
        value["band"] = serde_json::json!("J");
        let errors = parse_spectroscopy(value).validate().unwrap_err();
        assert!(errors.problems.iter().any(|p| p.contains("no entry for requested band J")));
    }

    #[test]
    fn test_imaging_mode_on_spectroscopy_query_rejected() {
        let mut value = valid_spectroscopy_json();
        value["mode"] = serde_json::json!({"gmosNImaging": {"filter": "R_PRIME"}});
        let errors = parse_spectroscopy(value).validate().unwrap_err();
        assert!(errors.problems.iter().any(|p| p.contains("spectroscopy mode")));
    }

    #[test]
    fn test_hour_angle_range_uses_conservative_bucket() {
        let mut value = valid_spectroscopy_json();
        value["constraints"]["elevationRange"] =
            serde_json::json!({"hourAngleRange": {"minHours": -2.0, "maxHours": 2.0}});
        let request = parse_spectroscopy(value).validate().unwrap();
        assert_eq!(request.conditions.air_mass, AirMassBucket::TwoPointZero);
    }

    #[test]
    fn test_graph_input_rejects_zero_exposures_and_zero_figures() {
        let mut value = valid_spectroscopy_json();
        value.as_object_mut().unwrap().remove("signalToNoise");
        value["exposureTime"] = serde_json::json!({"milliseconds": 2.5});
        value["exposures"] = serde_json::json!(0);
        value["significantFigures"] = serde_json::json!({"xAxis": 0});
        let input: SpectroscopyGraphInput = serde_json::from_value(value).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.problems.iter().any(|p| p.contains("exposures")));
        assert!(errors.problems.iter().any(|p| p.contains("significantFigures.xAxis")));
    }

    #[test]
    fn test_graph_input_resolves_millisecond_exposures() {
        let mut value = valid_spectroscopy_json();
        value.as_object_mut().unwrap().remove("signalToNoise");
        value["exposureTime"] = serde_json::json!({"milliseconds": 2.5});
        value["exposures"] = serde_json::json!(10);
        let input: SpectroscopyGraphInput = serde_json::from_value(value).unwrap();
        let request = input.validate().unwrap();
        assert_relative_eq!(request.exposure_time.as_seconds(), 0.0025);
        assert_eq!(request.exposures, 10);
    }

    #[test]
    fn test_imaging_input_resolves() {
        let value = serde_json::json!({
            "signalToNoise": 25.0,
            "sourceProfile": valid_spectroscopy_json()["sourceProfile"],
            "band": "R",
            "radialVelocity": {"metersPerSecond": 0.0},
            "constraints": valid_spectroscopy_json()["constraints"],
            "mode": {"gmosSImaging": {"filter": "I_PRIME"}}
        });
        let input: ImagingTimeInput = serde_json::from_value(value).unwrap();
        let request = input.validate().unwrap();
        assert!(matches!(request.mode, ObservingMode::GmosSouthImaging { .. }));
    }
}
