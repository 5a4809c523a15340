//! HTTP client for the detection backend.
//!
//! [`DetectorClient`] turns a [`DetectionRequest`] into the POST its
//! backend generation expects and decodes the answer into a
//! [`DetectionOutcome`].
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use karipap_models::{DetectionRequest, DetectionTab};
//! use karipap_sdk::{BackendContract, DetectorClient};
//!
//! # async fn run() -> Result<(), karipap_sdk::SdkError> {
//! let client = DetectorClient::connect("http://localhost:8000", BackendContract::Versioned)?;
//!
//! let health = client.check_health().await;
//! println!("backend healthy: {}", health.is_healthy());
//!
//! let request = DetectionRequest::text(DetectionTab::FakeNews, "Breaking: sky is green")?;
//! let outcome = client.detect(&request).await?;
//! println!("{:?}", outcome.result);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use chrono::Utc;
use karipap_models::{
    BackendHealth, DetectionOutcome, DetectionRequest, DetectionResponse, HealthResponse,
    ImageBody, ImagePayload, InputMode, OcrProbe, OcrProbeResponse, PendingInput, TextBody,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::endpoints::{BackendContract, Endpoints};
use crate::error::SdkError;

/// Client for one detection backend.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// No timeout is applied unless one is configured with
/// [`with_timeout`](Self::with_timeout): a slow backend keeps the request
/// outstanding until it answers.
#[derive(Debug, Clone)]
pub struct DetectorClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl DetectorClient {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Client for `endpoints` with no request timeout.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Client for `endpoints` with an optional per-request timeout.
    pub fn with_timeout(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoints,
        })
    }

    /// Validate `origin` and build a client with no timeout.
    pub fn connect(origin: &str, contract: BackendContract) -> Result<Self, SdkError> {
        Ok(Self::new(Endpoints::new(origin, contract)?))
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// `GET /health`.
    pub async fn health(&self) -> Result<BackendHealth, SdkError> {
        let url = self.endpoints.health();
        debug!(endpoint = %url, "health probe");
        let res = self.http.get(&url).send().await?;
        let body: HealthResponse = Self::read_json(res).await?;
        Ok(body.into())
    }

    /// Health probe that never fails: any error means unavailable.
    pub async fn check_health(&self) -> BackendHealth {
        match self.health().await {
            Ok(health) => {
                info!(status = %health.status, vision_api = ?health.vision_api, "backend health");
                health
            }
            Err(e) => {
                warn!(error = %e, "backend unavailable");
                BackendHealth::unavailable()
            }
        }
    }

    // ------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------

    /// POST `request` to the matching detection endpoint.
    ///
    /// Any non-2xx status is an error; so is a 2xx body that carries no
    /// verdict.  A verdict of `Error` inside a 2xx body is *not* an error
    /// here: it is returned as a normal outcome.
    pub async fn detect(&self, request: &DetectionRequest) -> Result<DetectionOutcome, SdkError> {
        let contract = self.endpoints.contract();
        if !contract.supports(request.tab) {
            return Err(SdkError::Config(format!(
                "{} detection is not available on the {contract} backend",
                request.tab
            )));
        }

        let mode = request.input_mode();
        let url = self.endpoints.detect(mode);
        let input_type = contract.input_type_field(mode);
        info!(
            request_id = %request.id,
            tab = %request.tab,
            endpoint = %url,
            "dispatching detection"
        );

        let response: DetectionResponse = match &request.input {
            PendingInput::Text(text) => self.post_json(&url, &TextBody { text, input_type }).await?,
            PendingInput::Image(payload) => {
                self.post_json(
                    &url,
                    &ImageBody {
                        image: payload.as_str(),
                        input_type,
                    },
                )
                .await?
            }
        };

        let outcome = response.into_outcome(request.tab, mode, Utc::now())?;
        info!(request_id = %request.id, error = outcome.result.is_error(), "detection settled");
        Ok(outcome)
    }

    /// Like [`detect`](Self::detect), but failures become an error outcome
    /// carrying the failure's message.
    pub async fn detect_or_error(&self, request: &DetectionRequest) -> DetectionOutcome {
        match self.detect(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(request_id = %request.id, error = %e, "detection failed");
                DetectionOutcome::failed(request.input_mode(), e)
            }
        }
    }

    // ------------------------------------------------------------------
    // OCR probe
    // ------------------------------------------------------------------

    /// POST the image to the OCR-only probe endpoint.
    pub async fn test_ocr(&self, payload: &ImagePayload) -> Result<OcrProbe, SdkError> {
        let url = self.endpoints.test_ocr();
        info!(endpoint = %url, payload_len = payload.len(), "OCR probe");
        let body = ImageBody {
            image: payload.as_str(),
            input_type: None,
        };
        let response: OcrProbeResponse = self.post_json(&url, &body).await?;
        Ok(response.into())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The endpoint catalogue this client calls.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Shorthand for the contract of [`endpoints`](Self::endpoints).
    pub fn contract(&self) -> BackendContract {
        self.endpoints.contract()
    }

    /// Endpoint a request of `mode` would be sent to.
    pub fn detect_url(&self, mode: InputMode) -> String {
        self.endpoints.detect(mode)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, SdkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.http.post(url).json(body).send().await?;
        Self::read_json(res).await
    }

    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, SdkError> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "backend returned an error status");
            return Err(SdkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
