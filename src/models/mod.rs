//! Immutable domain model: quantities, targets, modes, conditions,
//! requests, results.
//!
//! Values here are constructed during input coercion, consumed by the
//! orchestrator, and destroyed at response emission. Requests serialize
//! deterministically so the cache can address results by content.

pub mod conditions;
pub mod mode;
pub mod quantities;
pub mod request;
pub mod result;
pub mod target;

pub use conditions::{
    AirMassBucket, CloudExtinction, ImageQuality, ObservingConditions, SkyBackground, WaterVapor,
};
pub use mode::{
    CustomSlitWidth, FpuSelection, GmosNorthFilter, GmosNorthFpu, GmosNorthGrating,
    GmosSouthFilter, GmosSouthFpu, GmosSouthGrating, ObservingMode,
};
pub use quantities::{DataVersion, RadialVelocity, Redshift, SignalToNoise, TimeSpan, Wavelength};
pub use request::{
    ImagingTimeRequest, SignificantFigures, SpectroscopyGraphRequest, SpectroscopyTimeRequest,
};
pub use result::{
    CcdReadout, ExposurePlan, Graph, GraphGroup, GraphResult, GraphSeries, GraphType,
    SeriesDataType,
};
pub use target::{
    Band, Brightness, BrightnessUnit, EmissionLine, SourceGeometry, SpectralDefinition,
    SpectralEnergyDistribution, StellarLibrarySpectrum, TargetProfile,
};
