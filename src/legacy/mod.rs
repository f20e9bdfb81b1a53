//! Legacy calculator boundary: canonical documents, the bridge, and the
//! single-flight scheduler.
//!
//! The authoritative numeric kernel (radiative transfer, detector and
//! telescope models) lives in a legacy out-of-process deployment. This
//! module owns everything that crosses that boundary and nothing that lies
//! beyond it.

pub mod bridge;
pub mod document;
pub mod scheduler;

pub use bridge::{
    ExposurePayload, GraphsPayload, HttpLegacyCalculator, LegacyCalculator, LegacyResponse,
    UNKNOWN_RESULT,
};
pub use document::LegacyDocument;
pub use scheduler::CalculatorScheduler;
