//! HTTP client for the ring image backend.

use super::{GeneratedImage, GenerationRequest, ImageGenerator};
use crate::config::{HttpConfig, RingConfig, build_http_client};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_refinement: Option<bool>,
}

/// Response body, success or failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    image_url: Option<String>,
    prompt: Option<String>,
    error: Option<String>,
}

/// Blocking client for `POST {base}/api/generate-ring`.
pub struct RingApiClient {
    /// Backend base URL.
    base_url: String,
    /// Whether `base_url` is real.
    configured: bool,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl RingApiClient {
    /// Creates a client for a backend URL. A blank URL or the
    /// `YOUR_RENDER_URL` placeholder leaves the client unconfigured.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let configured =
            !base_url.is_empty() && base_url != crate::config::PLACEHOLDER_API_URL;
        Self {
            base_url,
            configured,
            client: build_http_client(HttpConfig::default()),
        }
    }

    /// Creates a client from configuration.
    #[must_use]
    pub fn from_config(config: &RingConfig) -> Self {
        Self::new(config.api_url.clone()).with_http_config(config.http)
    }

    /// Sets HTTP client timeouts.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns whether requests will be sent.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.configured
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate-ring", self.base_url)
    }
}

impl ImageGenerator for RingApiClient {
    fn name(&self) -> &'static str {
        "ring-api"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        if !self.configured {
            return Err(Error::NotConfigured {
                service: "Backend API".to_string(),
            });
        }

        let is_refinement = request.is_refinement();
        tracing::info!(
            backend = "ring-api",
            is_refinement,
            prompt_chars = request.prompt.chars().count(),
            "Requesting ring image"
        );

        let body = GenerateBody {
            prompt: &request.prompt,
            reference_image: request.reference_image.as_deref(),
            is_refinement: is_refinement.then_some(true),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    backend = "ring-api",
                    error = %e,
                    error_kind = error_kind,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "Image generation request failed"
                );
                Error::NetworkFailure {
                    operation: "generate_ring".to_string(),
                    status: None,
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        let status = response.status();
        let parsed: GenerateResponse = response.json().unwrap_or_default();

        if !status.is_success() {
            tracing::error!(
                backend = "ring-api",
                status = %status,
                "Image backend returned error status"
            );
            return Err(Error::NetworkFailure {
                operation: "generate_ring".to_string(),
                status: Some(status.as_u16()),
                cause: parsed
                    .error
                    .unwrap_or_else(|| format!("API request failed: {}", status.as_u16())),
            });
        }

        match parsed.image_url.filter(|url| parsed.success && !url.is_empty()) {
            Some(image_url) => Ok(GeneratedImage {
                image_url,
                prompt: parsed.prompt.unwrap_or_else(|| request.prompt.clone()),
                description: request.prompt.clone(),
                is_refinement,
            }),
            None => Err(Error::OperationFailed {
                operation: "generate_ring".to_string(),
                cause: parsed
                    .error
                    .unwrap_or_else(|| "No image generated".to_string()),
            }),
        }
    }
}
