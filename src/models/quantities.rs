//! Scalar quantity newtypes shared across the request and result model.
//!
//! Wavelengths are held as integral picometers and time spans as integral
//! microseconds so that logically equal requests serialize to identical
//! bytes for content addressing.

use serde::{Deserialize, Serialize};

/// Speed of light in meters per second.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Wavelength stored as positive picometers.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Wavelength(i64);

impl Wavelength {
    /// Create a wavelength from picometers.
    ///
    /// # Arguments
    /// * `pm` - Wavelength in picometers, must be positive
    pub fn from_picometers(pm: i64) -> Result<Self, String> {
        if pm > 0 {
            Ok(Wavelength(pm))
        } else {
            Err(format!("Wavelength must be positive, got {} pm", pm))
        }
    }

    /// Create a wavelength from a decimal angstrom value (1 Å = 100 pm).
    pub fn from_angstroms(angstroms: f64) -> Result<Self, String> {
        Self::from_decimal(angstroms, 100.0, "Å")
    }

    /// Create a wavelength from a decimal nanometer value (1 nm = 1000 pm).
    pub fn from_nanometers(nm: f64) -> Result<Self, String> {
        Self::from_decimal(nm, 1_000.0, "nm")
    }

    /// Create a wavelength from a decimal micrometer value (1 µm = 10⁶ pm).
    pub fn from_micrometers(um: f64) -> Result<Self, String> {
        Self::from_decimal(um, 1_000_000.0, "µm")
    }

    fn from_decimal(value: f64, pm_per_unit: f64, unit: &str) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("Wavelength must be finite, got {} {}", value, unit));
        }
        let pm = (value * pm_per_unit).round();
        if pm < 1.0 || pm > i64::MAX as f64 {
            return Err(format!("Wavelength out of range: {} {}", value, unit));
        }
        Ok(Wavelength(pm as i64))
    }

    pub fn picometers(&self) -> i64 {
        self.0
    }

    pub fn nanometers(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }
}

impl std::fmt::Display for Wavelength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} nm", self.nanometers())
    }
}

/// Non-negative signal-to-noise ratio.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SignalToNoise(f64);

impl SignalToNoise {
    /// Create a signal-to-noise value. Must be finite and non-negative;
    /// callers that require strict positivity (request goals) check that
    /// separately.
    pub fn new(value: f64) -> Result<Self, String> {
        if value.is_finite() && value >= 0.0 {
            Ok(SignalToNoise(value))
        } else {
            Err(format!("Signal-to-noise must be a non-negative finite number, got {}", value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for SignalToNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative time span with microsecond resolution.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSpan(i64);

impl TimeSpan {
    pub fn from_microseconds(us: i64) -> Result<Self, String> {
        if us >= 0 {
            Ok(TimeSpan(us))
        } else {
            Err(format!("Time span must be non-negative, got {} µs", us))
        }
    }

    /// Create a time span from decimal seconds, rounded to microseconds.
    pub fn from_seconds(seconds: f64) -> Result<Self, String> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("Time span must be non-negative and finite, got {} s", seconds));
        }
        let us = (seconds * 1e6).round();
        if us > i64::MAX as f64 {
            return Err(format!("Time span out of range: {} s", seconds));
        }
        Ok(TimeSpan(us as i64))
    }

    pub fn from_whole_seconds(seconds: i64) -> Result<Self, String> {
        if seconds < 0 {
            return Err(format!("Time span must be non-negative, got {} s", seconds));
        }
        seconds
            .checked_mul(1_000_000)
            .map(TimeSpan)
            .ok_or_else(|| format!("Time span out of range: {} s", seconds))
    }

    pub fn microseconds(&self) -> i64 {
        self.0
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1e6
    }
}

impl std::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.as_seconds())
    }
}

/// Radial velocity in meters per second, bounded by the speed of light.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RadialVelocity(f64);

impl RadialVelocity {
    pub fn from_meters_per_second(v: f64) -> Result<Self, String> {
        if v.is_finite() && v.abs() < SPEED_OF_LIGHT {
            Ok(RadialVelocity(v))
        } else {
            Err(format!("Radial velocity must be finite and below the speed of light, got {} m/s", v))
        }
    }

    pub fn meters_per_second(&self) -> f64 {
        self.0
    }

    /// Convert to a redshift using the relativistic Doppler relation
    /// `1 + z = sqrt((1 + β) / (1 − β))` with `β = v/c`.
    pub fn to_redshift(&self) -> Redshift {
        let beta = self.0 / SPEED_OF_LIGHT;
        Redshift(((1.0 + beta) / (1.0 - beta)).sqrt() - 1.0)
    }
}

/// Dimensionless redshift derived from the target's radial velocity.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Redshift(f64);

impl Redshift {
    pub fn new(z: f64) -> Self {
        Redshift(z)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Opaque version string reported by the legacy calculator deployment.
///
/// Cached results are only valid under the data version they were computed
/// with; the cache layer flushes wholesale when this changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataVersion(String);

impl DataVersion {
    pub fn new(value: impl Into<String>) -> Self {
        DataVersion(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
