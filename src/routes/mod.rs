//! Typed inputs and outputs for the query surface.
//!
//! The wire field names match the planning schema; the types here coerce
//! and validate them into the domain model before the core runs.

pub mod inputs;
pub mod outputs;

pub use inputs::{
    ImagingTimeInput, InputErrors, SpectroscopyGraphInput, SpectroscopyTimeInput,
};
pub use outputs::{
    IntegrationTimeResponse, SpectroscopyGraphResponse, VersionsResponse,
};
