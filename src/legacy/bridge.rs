//! Bridge to the out-of-process legacy calculator.
//!
//! The numeric kernel is a legacy deployment with its own version-skewed
//! runtime; it is reached over HTTP with canonical text documents so the
//! rest of the system stays ignorant of its internals. Every call returns a
//! discriminated union: a structured payload on success or a single-line
//! error message. The bridge never retries and must not be called
//! concurrently with itself; the surrounding scheduler owns that.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{CcdReadout, DataVersion, GraphGroup};

use super::document::LegacyDocument;

/// Error string produced when the legacy response cannot be understood.
pub const UNKNOWN_RESULT: &str = "unknown result from legacy calculator";

/// Outcome of a legacy call: payload or single-line error message.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyResponse<T> {
    Success(T),
    Error(String),
}

/// Graph payload returned by the legacy kernel: per-CCD readout attributes
/// and the typed series groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphsPayload {
    pub ccds: Vec<CcdReadout>,
    pub groups: Vec<GraphGroup>,
}

/// Exposure-plan payload returned by the legacy kernel's direct
/// signal-to-noise-at-wavelength path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposurePayload {
    pub exposure_time_secs: f64,
    pub exposures: u32,
    pub signal_to_noise: f64,
    pub single_signal_to_noise: f64,
}

/// Two-method surface of the legacy calculator plus the data-version probe
/// used for cache gating.
#[async_trait]
pub trait LegacyCalculator: Send + Sync {
    async fn calculate_graphs(&self, document: &LegacyDocument) -> LegacyResponse<GraphsPayload>;

    async fn calculate_exposure_time(
        &self,
        document: &LegacyDocument,
    ) -> LegacyResponse<ExposurePayload>;

    /// Current version of the upstream data tables. Cached results are only
    /// valid under the version they were computed with.
    async fn data_version(&self) -> anyhow::Result<DataVersion>;
}

/// Production bridge: POSTs canonical documents to the legacy sidecar.
pub struct HttpLegacyCalculator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLegacyCalculator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: reqwest::Client::new(), base_url }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        document: &LegacyDocument,
    ) -> LegacyResponse<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = match self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(document.render())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return LegacyResponse::Error(format!("legacy calculator unreachable: {}", e)),
        };

        if !response.status().is_success() {
            return LegacyResponse::Error(format!(
                "legacy calculator returned HTTP {}",
                response.status()
            ));
        }

        match response.text().await {
            Ok(body) => decode_envelope(&body),
            Err(e) => LegacyResponse::Error(format!("legacy calculator response unreadable: {}", e)),
        }
    }
}

#[async_trait]
impl LegacyCalculator for HttpLegacyCalculator {
    async fn calculate_graphs(&self, document: &LegacyDocument) -> LegacyResponse<GraphsPayload> {
        self.post("graphs", document).await
    }

    async fn calculate_exposure_time(
        &self,
        document: &LegacyDocument,
    ) -> LegacyResponse<ExposurePayload> {
        self.post("exposure-time", document).await
    }

    async fn data_version(&self) -> anyhow::Result<DataVersion> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct VersionBody {
            data_version: String,
        }

        let url = format!("{}/version", self.base_url);
        let body: VersionBody = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(DataVersion::new(body.data_version))
    }
}

/// Decode the legacy response envelope: `{"error": {"message": ...}}` or
/// `{"result": ...}`. Anything else is an unknown result, never a crash.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> LegacyResponse<T> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    #[derive(Deserialize)]
    struct Envelope<T> {
        error: Option<ErrorBody>,
        result: Option<T>,
    }

    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope { error: Some(error), .. }) => {
            LegacyResponse::Error(single_line(&error.message))
        }
        Ok(Envelope { result: Some(result), .. }) => LegacyResponse::Success(result),
        _ => LegacyResponse::Error(UNKNOWN_RESULT.to_string()),
    }
}

fn single_line(message: &str) -> String {
    message.lines().next().unwrap_or(UNKNOWN_RESULT).to_string()
}
