use anyhow::{Context, Result};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::generation::{ErrorBody, GenerationRequest, GenerationResponse, HealthStatus};

/// Message used when the service rejects a request without a `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Generation failed";

/// Why a generation call did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    /// HTTP 401: the API key was refused.
    #[error("API key rejected by the generation service")]
    Unauthorized,

    /// Any other non-2xx reply.
    #[error("Generation service error ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got a reply (connect error, timeout, ...).
    #[error("Generation request failed: {0}")]
    Transport(String),

    /// 2xx reply whose body does not match the response schema.
    #[error("Generation response did not match the expected schema: {0}")]
    InvalidResponse(String),
}

impl GenerationFailure {
    /// Text shown to the user for this failure.
    ///
    /// Rejections surface the service's own `detail` verbatim.
    pub fn user_message(&self) -> String {
        match self {
            GenerationFailure::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// HTTP client for the generation service.
///
/// One call per [`generate`](Self::generate); no retries are attempted.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    generate_url: String,
    health_url: String,
}

impl GenerationClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            generate_url: config.generate_url(),
            health_url: config.health_url(),
        })
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    /// Request original content plus translations.
    pub async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationFailure> {
        info!(
            "Requesting {} ({}, {}) in {} language(s)",
            request.content_type,
            request.tone,
            request.length,
            request.target_languages.len()
        );

        let response = self
            .http
            .post(&self.generate_url)
            .header("Content-Type", "application/json")
            .header("X-API-Key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Generation request failed to complete: {}", e);
                GenerationFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Generation service rejected the API key (401)");
            return Err(GenerationFailure::Unauthorized);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            warn!("Generation service error ({}): {}", status, body);
            return Err(GenerationFailure::Rejected {
                status: status.as_u16(),
                message: error_message_from_body(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationFailure::Transport(e.to_string()))?;
        let parsed: GenerationResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationFailure::InvalidResponse(e.to_string()))?;

        debug!(
            "Generation finished in {}ms with {} translation(s)",
            parsed.processing_time_ms,
            parsed.translations.len()
        );
        Ok(parsed)
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .context("Failed to reach generation service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Health check failed ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse health response")
    }
}

/// Pull the `detail` string out of an error body, or fall back to the
/// generic message.
fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
