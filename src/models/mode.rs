//! Observing mode: GMOS North/South spectroscopy and imaging configurations.
//!
//! Gratings carry the derived attributes the planning layer reports back
//! (reference resolution, simultaneous wavelength coverage, dispersion).
//! Resolution scales inversely with the effective slit width; the reference
//! values are quoted for a 0.5″ slit.

use serde::{Deserialize, Serialize};

use super::quantities::Wavelength;

// ============================================================================
// Gratings
// ============================================================================

/// GMOS North gratings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosNorthGrating {
    #[serde(rename = "B1200_G5301")]
    B1200G5301,
    #[serde(rename = "R831_G5302")]
    R831G5302,
    #[serde(rename = "B600_G5307")]
    B600G5307,
    #[serde(rename = "R600_G5304")]
    R600G5304,
    #[serde(rename = "R400_G5305")]
    R400G5305,
    #[serde(rename = "R150_G5308")]
    R150G5308,
}

impl GmosNorthGrating {
    /// Grating ruling density in lines per millimeter.
    pub fn ruling_density(&self) -> u32 {
        match self {
            GmosNorthGrating::B1200G5301 => 1200,
            GmosNorthGrating::R831G5302 => 831,
            GmosNorthGrating::B600G5307 => 600,
            GmosNorthGrating::R600G5304 => 600,
            GmosNorthGrating::R400G5305 => 400,
            GmosNorthGrating::R150G5308 => 150,
        }
    }

    /// Dispersion in picometers per pixel.
    pub fn dispersion_pm(&self) -> i64 {
        match self {
            GmosNorthGrating::B1200G5301 => 26,
            GmosNorthGrating::R831G5302 => 38,
            GmosNorthGrating::B600G5307 => 50,
            GmosNorthGrating::R600G5304 => 52,
            GmosNorthGrating::R400G5305 => 74,
            GmosNorthGrating::R150G5308 => 193,
        }
    }

    /// Resolving power for a 0.5″ slit at the blaze wavelength.
    pub fn reference_resolution(&self) -> u32 {
        match self {
            GmosNorthGrating::B1200G5301 => 3744,
            GmosNorthGrating::R831G5302 => 4396,
            GmosNorthGrating::B600G5307 => 1688,
            GmosNorthGrating::R600G5304 => 3744,
            GmosNorthGrating::R400G5305 => 1918,
            GmosNorthGrating::R150G5308 => 631,
        }
    }

    /// Simultaneous wavelength coverage.
    pub fn simultaneous_coverage(&self) -> Wavelength {
        let nm = match self {
            GmosNorthGrating::B1200G5301 => 164.0,
            GmosNorthGrating::R831G5302 => 235.0,
            GmosNorthGrating::B600G5307 => 307.0,
            GmosNorthGrating::R600G5304 => 318.0,
            GmosNorthGrating::R400G5305 => 462.0,
            GmosNorthGrating::R150G5308 => 1190.0,
        };
        Wavelength::from_nanometers(nm).expect("coverage table values are positive")
    }

    pub fn tag(&self) -> &'static str {
        match self {
            GmosNorthGrating::B1200G5301 => "B1200_G5301",
            GmosNorthGrating::R831G5302 => "R831_G5302",
            GmosNorthGrating::B600G5307 => "B600_G5307",
            GmosNorthGrating::R600G5304 => "R600_G5304",
            GmosNorthGrating::R400G5305 => "R400_G5305",
            GmosNorthGrating::R150G5308 => "R150_G5308",
        }
    }
}

/// GMOS South gratings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosSouthGrating {
    #[serde(rename = "B1200_G5321")]
    B1200G5321,
    #[serde(rename = "R831_G5322")]
    R831G5322,
    #[serde(rename = "B600_G5323")]
    B600G5323,
    #[serde(rename = "R600_G5324")]
    R600G5324,
    #[serde(rename = "R400_G5325")]
    R400G5325,
    #[serde(rename = "R150_G5326")]
    R150G5326,
}

impl GmosSouthGrating {
    pub fn ruling_density(&self) -> u32 {
        match self {
            GmosSouthGrating::B1200G5321 => 1200,
            GmosSouthGrating::R831G5322 => 831,
            GmosSouthGrating::B600G5323 => 600,
            GmosSouthGrating::R600G5324 => 600,
            GmosSouthGrating::R400G5325 => 400,
            GmosSouthGrating::R150G5326 => 150,
        }
    }

    pub fn dispersion_pm(&self) -> i64 {
        match self {
            GmosSouthGrating::B1200G5321 => 26,
            GmosSouthGrating::R831G5322 => 38,
            GmosSouthGrating::B600G5323 => 50,
            GmosSouthGrating::R600G5324 => 52,
            GmosSouthGrating::R400G5325 => 74,
            GmosSouthGrating::R150G5326 => 193,
        }
    }

    pub fn reference_resolution(&self) -> u32 {
        match self {
            GmosSouthGrating::B1200G5321 => 3744,
            GmosSouthGrating::R831G5322 => 4396,
            GmosSouthGrating::B600G5323 => 1688,
            GmosSouthGrating::R600G5324 => 3744,
            GmosSouthGrating::R400G5325 => 1918,
            GmosSouthGrating::R150G5326 => 631,
        }
    }

    pub fn simultaneous_coverage(&self) -> Wavelength {
        let nm = match self {
            GmosSouthGrating::B1200G5321 => 164.0,
            GmosSouthGrating::R831G5322 => 235.0,
            GmosSouthGrating::B600G5323 => 307.0,
            GmosSouthGrating::R600G5324 => 318.0,
            GmosSouthGrating::R400G5325 => 462.0,
            GmosSouthGrating::R150G5326 => 1190.0,
        };
        Wavelength::from_nanometers(nm).expect("coverage table values are positive")
    }

    pub fn tag(&self) -> &'static str {
        match self {
            GmosSouthGrating::B1200G5321 => "B1200_G5321",
            GmosSouthGrating::R831G5322 => "R831_G5322",
            GmosSouthGrating::B600G5323 => "B600_G5323",
            GmosSouthGrating::R600G5324 => "R600_G5324",
            GmosSouthGrating::R400G5325 => "R400_G5325",
            GmosSouthGrating::R150G5326 => "R150_G5326",
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

/// GMOS North filters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosNorthFilter {
    #[serde(rename = "U_PRIME")]
    UPrime,
    #[serde(rename = "G_PRIME")]
    GPrime,
    #[serde(rename = "R_PRIME")]
    RPrime,
    #[serde(rename = "I_PRIME")]
    IPrime,
    #[serde(rename = "Z_PRIME")]
    ZPrime,
    #[serde(rename = "GG455")]
    Gg455,
    #[serde(rename = "OG515")]
    Og515,
    #[serde(rename = "RG610")]
    Rg610,
}

impl GmosNorthFilter {
    pub fn tag(&self) -> &'static str {
        match self {
            GmosNorthFilter::UPrime => "U_PRIME",
            GmosNorthFilter::GPrime => "G_PRIME",
            GmosNorthFilter::RPrime => "R_PRIME",
            GmosNorthFilter::IPrime => "I_PRIME",
            GmosNorthFilter::ZPrime => "Z_PRIME",
            GmosNorthFilter::Gg455 => "GG455",
            GmosNorthFilter::Og515 => "OG515",
            GmosNorthFilter::Rg610 => "RG610",
        }
    }
}

/// GMOS South filters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosSouthFilter {
    #[serde(rename = "U_PRIME")]
    UPrime,
    #[serde(rename = "G_PRIME")]
    GPrime,
    #[serde(rename = "R_PRIME")]
    RPrime,
    #[serde(rename = "I_PRIME")]
    IPrime,
    #[serde(rename = "Z_PRIME")]
    ZPrime,
    #[serde(rename = "GG455")]
    Gg455,
    #[serde(rename = "OG515")]
    Og515,
    #[serde(rename = "RG610")]
    Rg610,
}

impl GmosSouthFilter {
    pub fn tag(&self) -> &'static str {
        match self {
            GmosSouthFilter::UPrime => "U_PRIME",
            GmosSouthFilter::GPrime => "G_PRIME",
            GmosSouthFilter::RPrime => "R_PRIME",
            GmosSouthFilter::IPrime => "I_PRIME",
            GmosSouthFilter::ZPrime => "Z_PRIME",
            GmosSouthFilter::Gg455 => "GG455",
            GmosSouthFilter::Og515 => "OG515",
            GmosSouthFilter::Rg610 => "RG610",
        }
    }
}

// ============================================================================
// Focal-plane units
// ============================================================================

/// GMOS North built-in focal-plane units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosNorthFpu {
    #[serde(rename = "LONG_SLIT_0_25")]
    LongSlit025,
    #[serde(rename = "LONG_SLIT_0_50")]
    LongSlit050,
    #[serde(rename = "LONG_SLIT_0_75")]
    LongSlit075,
    #[serde(rename = "LONG_SLIT_1_00")]
    LongSlit100,
    #[serde(rename = "LONG_SLIT_1_50")]
    LongSlit150,
    #[serde(rename = "LONG_SLIT_2_00")]
    LongSlit200,
    #[serde(rename = "LONG_SLIT_5_00")]
    LongSlit500,
    #[serde(rename = "IFU_2_SLITS")]
    Ifu2Slits,
    #[serde(rename = "IFU_BLUE")]
    IfuBlue,
    #[serde(rename = "IFU_RED")]
    IfuRed,
}

impl GmosNorthFpu {
    /// Effective slit width in arcseconds.
    pub fn slit_width_arcsec(&self) -> f64 {
        match self {
            GmosNorthFpu::LongSlit025 => 0.25,
            GmosNorthFpu::LongSlit050 => 0.50,
            GmosNorthFpu::LongSlit075 => 0.75,
            GmosNorthFpu::LongSlit100 => 1.00,
            GmosNorthFpu::LongSlit150 => 1.50,
            GmosNorthFpu::LongSlit200 => 2.00,
            GmosNorthFpu::LongSlit500 => 5.00,
            // IFU elements are 0.31″ lenslets.
            GmosNorthFpu::Ifu2Slits | GmosNorthFpu::IfuBlue | GmosNorthFpu::IfuRed => 0.31,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            GmosNorthFpu::LongSlit025 => "LONG_SLIT_0_25",
            GmosNorthFpu::LongSlit050 => "LONG_SLIT_0_50",
            GmosNorthFpu::LongSlit075 => "LONG_SLIT_0_75",
            GmosNorthFpu::LongSlit100 => "LONG_SLIT_1_00",
            GmosNorthFpu::LongSlit150 => "LONG_SLIT_1_50",
            GmosNorthFpu::LongSlit200 => "LONG_SLIT_2_00",
            GmosNorthFpu::LongSlit500 => "LONG_SLIT_5_00",
            GmosNorthFpu::Ifu2Slits => "IFU_2_SLITS",
            GmosNorthFpu::IfuBlue => "IFU_BLUE",
            GmosNorthFpu::IfuRed => "IFU_RED",
        }
    }
}

/// GMOS South built-in focal-plane units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmosSouthFpu {
    #[serde(rename = "LONG_SLIT_0_25")]
    LongSlit025,
    #[serde(rename = "LONG_SLIT_0_50")]
    LongSlit050,
    #[serde(rename = "LONG_SLIT_0_75")]
    LongSlit075,
    #[serde(rename = "LONG_SLIT_1_00")]
    LongSlit100,
    #[serde(rename = "LONG_SLIT_1_50")]
    LongSlit150,
    #[serde(rename = "LONG_SLIT_2_00")]
    LongSlit200,
    #[serde(rename = "LONG_SLIT_5_00")]
    LongSlit500,
    #[serde(rename = "IFU_2_SLITS")]
    Ifu2Slits,
    #[serde(rename = "IFU_BLUE")]
    IfuBlue,
    #[serde(rename = "IFU_RED")]
    IfuRed,
}

impl GmosSouthFpu {
    pub fn slit_width_arcsec(&self) -> f64 {
        match self {
            GmosSouthFpu::LongSlit025 => 0.25,
            GmosSouthFpu::LongSlit050 => 0.50,
            GmosSouthFpu::LongSlit075 => 0.75,
            GmosSouthFpu::LongSlit100 => 1.00,
            GmosSouthFpu::LongSlit150 => 1.50,
            GmosSouthFpu::LongSlit200 => 2.00,
            GmosSouthFpu::LongSlit500 => 5.00,
            GmosSouthFpu::Ifu2Slits | GmosSouthFpu::IfuBlue | GmosSouthFpu::IfuRed => 0.31,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            GmosSouthFpu::LongSlit025 => "LONG_SLIT_0_25",
            GmosSouthFpu::LongSlit050 => "LONG_SLIT_0_50",
            GmosSouthFpu::LongSlit075 => "LONG_SLIT_0_75",
            GmosSouthFpu::LongSlit100 => "LONG_SLIT_1_00",
            GmosSouthFpu::LongSlit150 => "LONG_SLIT_1_50",
            GmosSouthFpu::LongSlit200 => "LONG_SLIT_2_00",
            GmosSouthFpu::LongSlit500 => "LONG_SLIT_5_00",
            GmosSouthFpu::Ifu2Slits => "IFU_2_SLITS",
            GmosSouthFpu::IfuBlue => "IFU_BLUE",
            GmosSouthFpu::IfuRed => "IFU_RED",
        }
    }
}

/// Slit widths available for custom masks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomSlitWidth {
    #[serde(rename = "CUSTOM_WIDTH_0_25")]
    Width025,
    #[serde(rename = "CUSTOM_WIDTH_0_50")]
    Width050,
    #[serde(rename = "CUSTOM_WIDTH_0_75")]
    Width075,
    #[serde(rename = "CUSTOM_WIDTH_1_00")]
    Width100,
    #[serde(rename = "CUSTOM_WIDTH_1_50")]
    Width150,
    #[serde(rename = "CUSTOM_WIDTH_2_00")]
    Width200,
    #[serde(rename = "CUSTOM_WIDTH_5_00")]
    Width500,
}

impl CustomSlitWidth {
    pub fn arcsec(&self) -> f64 {
        match self {
            CustomSlitWidth::Width025 => 0.25,
            CustomSlitWidth::Width050 => 0.50,
            CustomSlitWidth::Width075 => 0.75,
            CustomSlitWidth::Width100 => 1.00,
            CustomSlitWidth::Width150 => 1.50,
            CustomSlitWidth::Width200 => 2.00,
            CustomSlitWidth::Width500 => 5.00,
        }
    }
}

/// Focal-plane unit selection: a built-in unit or a custom mask slit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FpuSelection<B> {
    Builtin(B),
    CustomMask { slit_width: CustomSlitWidth },
}

impl FpuSelection<GmosNorthFpu> {
    pub fn slit_width_arcsec(&self) -> f64 {
        match self {
            FpuSelection::Builtin(fpu) => fpu.slit_width_arcsec(),
            FpuSelection::CustomMask { slit_width } => slit_width.arcsec(),
        }
    }

    pub fn tag(&self) -> String {
        match self {
            FpuSelection::Builtin(fpu) => fpu.tag().to_string(),
            FpuSelection::CustomMask { slit_width } => format!("CUSTOM_MASK_{:.2}", slit_width.arcsec()),
        }
    }
}

impl FpuSelection<GmosSouthFpu> {
    pub fn slit_width_arcsec(&self) -> f64 {
        match self {
            FpuSelection::Builtin(fpu) => fpu.slit_width_arcsec(),
            FpuSelection::CustomMask { slit_width } => slit_width.arcsec(),
        }
    }

    pub fn tag(&self) -> String {
        match self {
            FpuSelection::Builtin(fpu) => fpu.tag().to_string(),
            FpuSelection::CustomMask { slit_width } => format!("CUSTOM_MASK_{:.2}", slit_width.arcsec()),
        }
    }
}

// ============================================================================
// Observing mode
// ============================================================================

/// Spectroscopy or imaging configuration for one of the two GMOS sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservingMode {
    GmosNorthSpectroscopy {
        grating: GmosNorthGrating,
        fpu: FpuSelection<GmosNorthFpu>,
        filter: Option<GmosNorthFilter>,
        central_wavelength: Wavelength,
    },
    GmosSouthSpectroscopy {
        grating: GmosSouthGrating,
        fpu: FpuSelection<GmosSouthFpu>,
        filter: Option<GmosSouthFilter>,
        central_wavelength: Wavelength,
    },
    GmosNorthImaging {
        filter: GmosNorthFilter,
    },
    GmosSouthImaging {
        filter: GmosSouthFilter,
    },
}

impl ObservingMode {
    pub fn instrument(&self) -> &'static str {
        match self {
            ObservingMode::GmosNorthSpectroscopy { .. } | ObservingMode::GmosNorthImaging { .. } => {
                "GMOS_NORTH"
            }
            ObservingMode::GmosSouthSpectroscopy { .. } | ObservingMode::GmosSouthImaging { .. } => {
                "GMOS_SOUTH"
            }
        }
    }

    pub fn is_spectroscopy(&self) -> bool {
        matches!(
            self,
            ObservingMode::GmosNorthSpectroscopy { .. } | ObservingMode::GmosSouthSpectroscopy { .. }
        )
    }

    pub fn central_wavelength(&self) -> Option<Wavelength> {
        match self {
            ObservingMode::GmosNorthSpectroscopy { central_wavelength, .. }
            | ObservingMode::GmosSouthSpectroscopy { central_wavelength, .. } => {
                Some(*central_wavelength)
            }
            _ => None,
        }
    }

    /// Resolving power for the configured slit, scaled from the grating's
    /// 0.5″ reference value. Imaging modes have none.
    pub fn resolution(&self) -> Option<f64> {
        match self {
            ObservingMode::GmosNorthSpectroscopy { grating, fpu, .. } => {
                Some(scaled_resolution(grating.reference_resolution(), fpu.slit_width_arcsec()))
            }
            ObservingMode::GmosSouthSpectroscopy { grating, fpu, .. } => {
                Some(scaled_resolution(grating.reference_resolution(), fpu.slit_width_arcsec()))
            }
            _ => None,
        }
    }

    /// Dispersion in picometers per pixel. Imaging modes have none.
    pub fn dispersion_pm(&self) -> Option<i64> {
        match self {
            ObservingMode::GmosNorthSpectroscopy { grating, .. } => Some(grating.dispersion_pm()),
            ObservingMode::GmosSouthSpectroscopy { grating, .. } => Some(grating.dispersion_pm()),
            _ => None,
        }
    }

    /// Simultaneous wavelength coverage. Imaging modes have none.
    pub fn wavelength_coverage(&self) -> Option<Wavelength> {
        match self {
            ObservingMode::GmosNorthSpectroscopy { grating, .. } => {
                Some(grating.simultaneous_coverage())
            }
            ObservingMode::GmosSouthSpectroscopy { grating, .. } => {
                Some(grating.simultaneous_coverage())
            }
            _ => None,
        }
    }
}

fn scaled_resolution(reference: u32, slit_width_arcsec: f64) -> f64 {
    reference as f64 * 0.5 / slit_width_arcsec
}
