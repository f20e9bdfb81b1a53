//! Target description: spatial profile, spectral definition, brightness.

use serde::{Deserialize, Serialize};

use super::quantities::{Redshift, Wavelength};

/// Spatial geometry of the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceGeometry {
    /// Unresolved point source.
    Point,
    /// Uniform surface brightness extended source.
    Uniform,
    /// Gaussian extended source with the given full width at half maximum.
    Gaussian { fwhm_arcsec: f64 },
}

/// Library template spectra available to the legacy calculator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StellarLibrarySpectrum {
    #[serde(rename = "O5V")]
    O5V,
    #[serde(rename = "B0V")]
    B0V,
    #[serde(rename = "B5V")]
    B5V,
    #[serde(rename = "A0V")]
    A0V,
    #[serde(rename = "A5V")]
    A5V,
    #[serde(rename = "F0V")]
    F0V,
    #[serde(rename = "F5V")]
    F5V,
    #[serde(rename = "G0V")]
    G0V,
    #[serde(rename = "G2V")]
    G2V,
    #[serde(rename = "G5V")]
    G5V,
    #[serde(rename = "K0V")]
    K0V,
    #[serde(rename = "K5V")]
    K5V,
    #[serde(rename = "M0V")]
    M0V,
    #[serde(rename = "M5V")]
    M5V,
    #[serde(rename = "K0III")]
    K0Iii,
    #[serde(rename = "K5III")]
    K5Iii,
    #[serde(rename = "M0III")]
    M0Iii,
    #[serde(rename = "ELLIPTICAL_GALAXY")]
    EllipticalGalaxy,
    #[serde(rename = "SPIRAL_GALAXY")]
    SpiralGalaxy,
    #[serde(rename = "QUASAR")]
    Quasar,
    #[serde(rename = "PLANETARY_NEBULA")]
    PlanetaryNebula,
}

impl StellarLibrarySpectrum {
    pub fn tag(&self) -> &'static str {
        match self {
            StellarLibrarySpectrum::O5V => "O5V",
            StellarLibrarySpectrum::B0V => "B0V",
            StellarLibrarySpectrum::B5V => "B5V",
            StellarLibrarySpectrum::A0V => "A0V",
            StellarLibrarySpectrum::A5V => "A5V",
            StellarLibrarySpectrum::F0V => "F0V",
            StellarLibrarySpectrum::F5V => "F5V",
            StellarLibrarySpectrum::G0V => "G0V",
            StellarLibrarySpectrum::G2V => "G2V",
            StellarLibrarySpectrum::G5V => "G5V",
            StellarLibrarySpectrum::K0V => "K0V",
            StellarLibrarySpectrum::K5V => "K5V",
            StellarLibrarySpectrum::M0V => "M0V",
            StellarLibrarySpectrum::M5V => "M5V",
            StellarLibrarySpectrum::K0Iii => "K0III",
            StellarLibrarySpectrum::K5Iii => "K5III",
            StellarLibrarySpectrum::M0Iii => "M0III",
            StellarLibrarySpectrum::EllipticalGalaxy => "ELLIPTICAL_GALAXY",
            StellarLibrarySpectrum::SpiralGalaxy => "SPIRAL_GALAXY",
            StellarLibrarySpectrum::Quasar => "QUASAR",
            StellarLibrarySpectrum::PlanetaryNebula => "PLANETARY_NEBULA",
        }
    }
}

/// Spectral energy distribution before band normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpectralEnergyDistribution {
    /// A library template spectrum.
    Library(StellarLibrarySpectrum),
    /// Black body of the given temperature.
    BlackBody { temperature_kelvin: f64 },
    /// Power law `F(λ) ∝ λ^index`.
    PowerLaw { index: f64 },
}

/// Photometric band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    SloanU,
    SloanG,
    SloanR,
    SloanI,
    SloanZ,
    U,
    B,
    V,
    R,
    I,
    Y,
    J,
    H,
    K,
    L,
    M,
    N,
    Q,
}

impl Band {
    pub fn tag(&self) -> &'static str {
        match self {
            Band::SloanU => "SLOAN_U",
            Band::SloanG => "SLOAN_G",
            Band::SloanR => "SLOAN_R",
            Band::SloanI => "SLOAN_I",
            Band::SloanZ => "SLOAN_Z",
            Band::U => "U",
            Band::B => "B",
            Band::V => "V",
            Band::R => "R",
            Band::I => "I",
            Band::Y => "Y",
            Band::J => "J",
            Band::H => "H",
            Band::K => "K",
            Band::L => "L",
            Band::M => "M",
            Band::N => "N",
            Band::Q => "Q",
        }
    }
}

/// Unit system for a brightness value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrightnessUnit {
    VegaMagnitude,
    AbMagnitude,
    Jansky,
}

impl BrightnessUnit {
    pub fn tag(&self) -> &'static str {
        match self {
            BrightnessUnit::VegaMagnitude => "VEGA_MAGNITUDE",
            BrightnessUnit::AbMagnitude => "AB_MAGNITUDE",
            BrightnessUnit::Jansky => "JANSKY",
        }
    }
}

/// Brightness of the target in a specific band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brightness {
    pub band: Band,
    pub value: f64,
    pub unit: BrightnessUnit,
}

/// Single emission line on a flat continuum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionLine {
    pub wavelength: Wavelength,
    /// Line width in km/s.
    pub line_width: f64,
    /// Integrated line flux in W/m².
    pub line_flux: f64,
    /// Continuum flux density in W/m²/µm.
    pub continuum: f64,
}

/// Spectral definition: a band-normalized SED or an emission-line source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpectralDefinition {
    BandNormalized {
        sed: SpectralEnergyDistribution,
        brightness: Brightness,
    },
    EmissionLine(EmissionLine),
}

/// Immutable description of the astronomical target, constructed during
/// input coercion and consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub geometry: SourceGeometry,
    pub spectral: SpectralDefinition,
    pub redshift: Redshift,
}
