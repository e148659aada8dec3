// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`], which handles request construction and
//! authentication and turns every failure into a typed [`ProviderError`].
//! It never retries; callers decide what is worth another attempt.

use std::time::Duration;

use regua_core::{ProviderError, ReguaError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound on how much of an unparseable error body is kept for logs.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token sent on every request
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `timeout` - transport timeout for each call
    pub fn new(
        api_key: SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReguaError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| ReguaError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ReguaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a non-streaming chat-completion request.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                message: if e.is_timeout() {
                    format!("request timed out: {e}")
                } else {
                    format!("HTTP request failed: {e}")
                },
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response.text().await.map_err(|e| ProviderError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(classify_failure(status, &request.model, &body));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
            message: format!("failed to parse API response: {e}"),
        })
    }
}

/// Maps a non-success response to a [`ProviderError`] variant.
///
/// The error body's `code`/`type` fields are checked alongside the status:
/// model access problems can arrive as 403 and quota exhaustion as 429.
pub fn classify_failure(status: StatusCode, model: &str, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|r| r.error);

    let message = match &detail {
        Some(d) if !d.message.is_empty() => d.message.clone(),
        _ => {
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            format!("API returned {status}: {snippet}")
        }
    };

    let code = detail.as_ref().and_then(|d| d.code.as_deref());
    let kind = detail.as_ref().and_then(|d| d.type_.as_deref());

    if code == Some("model_not_found") || status == StatusCode::NOT_FOUND {
        ProviderError::ModelUnavailable {
            model: model.to_string(),
            message,
        }
    } else if status == StatusCode::UNAUTHORIZED || code == Some("invalid_api_key") {
        ProviderError::Auth { message }
    } else if status == StatusCode::TOO_MANY_REQUESTS
        || matches!(code, Some("rate_limit_exceeded" | "insufficient_quota"))
        || kind == Some("insufficient_quota")
    {
        ProviderError::RateLimited { message }
    } else {
        ProviderError::UpstreamHttp {
            status: status.as_u16(),
            message,
        }
    }
}
