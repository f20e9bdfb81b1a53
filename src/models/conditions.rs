//! Observing conditions: enumerated constraint bins and air-mass bucketing.

use serde::{Deserialize, Serialize};

/// Delivered image quality bin (FWHM upper bound in arcseconds).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageQuality {
    PointOne,
    PointTwo,
    PointThree,
    PointFour,
    PointSix,
    PointEight,
    OnePointZero,
    OnePointFive,
    TwoPointZero,
}

impl ImageQuality {
    pub fn to_arcsec(&self) -> f64 {
        match self {
            ImageQuality::PointOne => 0.1,
            ImageQuality::PointTwo => 0.2,
            ImageQuality::PointThree => 0.3,
            ImageQuality::PointFour => 0.4,
            ImageQuality::PointSix => 0.6,
            ImageQuality::PointEight => 0.8,
            ImageQuality::OnePointZero => 1.0,
            ImageQuality::OnePointFive => 1.5,
            ImageQuality::TwoPointZero => 2.0,
        }
    }
}

/// Cloud extinction bin (magnitudes of extinction).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudExtinction {
    PointOne,
    PointThree,
    PointFive,
    OnePointZero,
    OnePointFive,
    TwoPointZero,
    ThreePointZero,
}

impl CloudExtinction {
    pub fn to_magnitudes(&self) -> f64 {
        match self {
            CloudExtinction::PointOne => 0.1,
            CloudExtinction::PointThree => 0.3,
            CloudExtinction::PointFive => 0.5,
            CloudExtinction::OnePointZero => 1.0,
            CloudExtinction::OnePointFive => 1.5,
            CloudExtinction::TwoPointZero => 2.0,
            CloudExtinction::ThreePointZero => 3.0,
        }
    }
}

/// Sky background brightness bin.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkyBackground {
    Darkest,
    Dark,
    Gray,
    Bright,
}

impl SkyBackground {
    pub fn tag(&self) -> &'static str {
        match self {
            SkyBackground::Darkest => "DARKEST",
            SkyBackground::Dark => "DARK",
            SkyBackground::Gray => "GRAY",
            SkyBackground::Bright => "BRIGHT",
        }
    }
}

/// Water vapor content bin.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterVapor {
    VeryDry,
    Dry,
    Median,
    Wet,
}

impl WaterVapor {
    pub fn tag(&self) -> &'static str {
        match self {
            WaterVapor::VeryDry => "VERY_DRY",
            WaterVapor::Dry => "DRY",
            WaterVapor::Median => "MEDIAN",
            WaterVapor::Wet => "WET",
        }
    }
}

/// Air mass bucketed to the three values the legacy tables are computed for.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AirMassBucket {
    OnePointTwo,
    OnePointFive,
    TwoPointZero,
}

impl AirMassBucket {
    /// Bucket a positive air mass: values up to 1.2 map to 1.2, values up to
    /// 1.5 map to 1.5, everything above maps to 2.0.
    ///
    /// # Arguments
    /// * `air_mass` - Air mass, must be at least 1 (zenith) and finite
    pub fn from_air_mass(air_mass: f64) -> Result<Self, String> {
        if !air_mass.is_finite() || air_mass < 1.0 {
            return Err(format!("Air mass must be a finite value of at least 1, got {}", air_mass));
        }
        if air_mass <= 1.2 {
            Ok(AirMassBucket::OnePointTwo)
        } else if air_mass <= 1.5 {
            Ok(AirMassBucket::OnePointFive)
        } else {
            Ok(AirMassBucket::TwoPointZero)
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            AirMassBucket::OnePointTwo => 1.2,
            AirMassBucket::OnePointFive => 1.5,
            AirMassBucket::TwoPointZero => 2.0,
        }
    }
}

/// Immutable site/atmospheric constraints attached to a calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservingConditions {
    pub image_quality: ImageQuality,
    pub cloud_extinction: CloudExtinction,
    pub sky_background: SkyBackground,
    pub water_vapor: WaterVapor,
    pub air_mass: AirMassBucket,
}
