// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter for the Regua analysis service.
//!
//! This crate implements [`ChatProvider`] on top of [`OpenAiClient`].

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use regua_config::OpenAiConfig;
use regua_core::{ChatProvider, CompletionRequest, CompletionResult, ProviderError, ReguaError};
use secrecy::SecretString;
use tracing::info;

pub use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`ChatProvider`].
///
/// API key resolution order: `openai.api_key` -> `OPENAI_API_KEY` env var -> error.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from configuration.
    ///
    /// Returns [`ReguaError::MissingApiKey`] when no key can be resolved.
    pub fn new(config: &OpenAiConfig) -> Result<Self, ReguaError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())?;
        let client = OpenAiClient::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(base_url = %config.base_url, "OpenAI provider initialized");
        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

/// Picks the configured key, else the environment value; blank values count as absent.
pub fn resolve_api_key(
    configured: Option<&str>,
    from_env: Option<String>,
) -> Result<SecretString, ReguaError> {
    configured
        .map(str::to_string)
        .filter(|k| !k.trim().is_empty())
        .or_else(|| from_env.filter(|k| !k.trim().is_empty()))
        .map(SecretString::from)
        .ok_or(ReguaError::MissingApiKey)
}

fn to_api_request(request: CompletionRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request.model,
        messages: request.messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        presence_penalty: request.presence_penalty,
        frequency_penalty: request.frequency_penalty,
    }
}

/// Reduces an API response to its first choice and usage.
fn into_completion_result(response: ChatCompletionResponse, requested_model: &str) -> CompletionResult {
    let first = response.choices.into_iter().next();
    let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
    let text = first.and_then(|c| c.message).and_then(|m| m.content);

    CompletionResult {
        text,
        tokens_used: response.usage.map(|u| u.total_tokens).unwrap_or(0),
        finish_reason,
        model: if response.model.is_empty() {
            requested_model.to_string()
        } else {
            response.model
        },
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let model = request.model.clone();
        let response = self.client.chat_completion(&to_api_request(request)).await?;
        Ok(into_completion_result(response, &model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regua_core::ChatMessage;
    use secrecy::ExposeSecret;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        let client = OpenAiClient::new(
            SecretString::from("sk-test".to_string()),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap();
        OpenAiProvider::with_client(client)
    }

    #[test]
    fn configured_key_wins_over_env() {
        let key = resolve_api_key(Some("sk-config"), Some("sk-env".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-config");
    }

    #[test]
    fn env_key_used_when_config_blank() {
        let key = resolve_api_key(Some("  "), Some("sk-env".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-env");
    }

    #[test]
    fn missing_key_is_reported() {
        let err = resolve_api_key(None, Some(String::new())).unwrap_err();
        assert!(matches!(err, ReguaError::MissingApiKey));
    }

    #[test]
    fn empty_choices_yield_no_text_and_zero_tokens() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"model":"","choices":[]}"#).unwrap();
        let result = into_completion_result(response, "gpt-4");
        assert!(result.text.is_none());
        assert!(result.finish_reason.is_none());
        assert_eq!(result.tokens_used, 0);
        assert_eq!(result.model, "gpt-4");
    }

    #[tokio::test]
    async fn probe_request_is_sent_as_single_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o",
                "max_tokens": 1,
                "temperature": 0.0,
                "messages": [{"role": "user", "content": "test"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o",
                "choices": [{"message": {"role": "assistant", "content": "ok"}, "finish_reason": "length"}],
                "usage": {"prompt_tokens": 8, "completion_tokens": 1, "total_tokens": 9}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .complete(CompletionRequest::probe("gpt-4o"))
            .await
            .unwrap();
        assert_eq!(result.text.as_deref(), Some("ok"));
        assert_eq!(result.tokens_used, 9);
        assert_eq!(result.finish_reason.as_deref(), Some("length"));
    }

    #[tokio::test]
    async fn system_and_user_messages_are_forwarded_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "score this"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o",
                "choices": [{"message": {"content": "8/10"}, "finish_reason": "stop"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("score this")],
            max_tokens: 100,
            temperature: 0.0,
            presence_penalty: Some(0.1),
            frequency_penalty: Some(0.1),
        };
        let result = provider_for(&server).complete(request).await.unwrap();
        assert_eq!(result.text.as_deref(), Some("8/10"));
    }

    #[tokio::test]
    async fn missing_model_maps_to_model_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"message": "The model `gpt-5` does not exist", "type": "invalid_request_error", "code": "model_not_found"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .complete(CompletionRequest::probe("gpt-5"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ModelUnavailable { ref model, .. } if model == "gpt-5"));
    }
}
