//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::ItcService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request-processing engine.
    pub service: Arc<ItcService>,
}

impl AppState {
    /// Create a new application state over the given service.
    pub fn new(service: Arc<ItcService>) -> Self {
        Self { service }
    }
}
