//! Public API surface for the ITC backend.
//!
//! This file consolidates the quantity newtypes and result types the HTTP
//! layer and integration tests work with. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::models::quantities::{
    DataVersion, RadialVelocity, Redshift, SignalToNoise, TimeSpan, Wavelength,
};

pub use crate::models::result::{
    CcdReadout, ExposurePlan, Graph, GraphGroup, GraphResult, GraphSeries, GraphType,
    SeriesDataType,
};

pub use crate::models::request::{
    ImagingTimeRequest, SignificantFigures, SpectroscopyGraphRequest, SpectroscopyTimeRequest,
};

pub use crate::services::orchestrator::{ItcError, ItcService, Versioned, SERVER_VERSION};
