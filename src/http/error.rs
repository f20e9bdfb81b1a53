//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::inputs::InputErrors;
use crate::services::ItcError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Individual validation problems, when there are several
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub problems: Vec<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), problems: Vec::new() }
    }

    pub fn with_problems(mut self, problems: Vec<String>) -> Self {
        self.problems = problems;
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Input coercion failed (one or more collected problems)
    Validation(InputErrors),
    /// Domain failure surfaced by the engine
    Domain(ItcError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_INPUT", errors.to_string()).with_problems(errors.problems),
            ),
            AppError::Domain(e) => {
                let code = match &e {
                    ItcError::SourceTooBright { .. } => "SOURCE_TOO_BRIGHT",
                    ItcError::Calculation(_) => "CALCULATION_ERROR",
                    ItcError::IntegrationTime(_) => "INTEGRATION_TIME_ERROR",
                    ItcError::Upstream(_) => "UPSTREAM_ERROR",
                };
                let status = match &e {
                    ItcError::Upstream(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, ApiError::new(code, e.to_string()))
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new("INTERNAL_ERROR", msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<InputErrors> for AppError {
    fn from(errors: InputErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<ItcError> for AppError {
    fn from(error: ItcError) -> Self {
        AppError::Domain(error)
    }
}
