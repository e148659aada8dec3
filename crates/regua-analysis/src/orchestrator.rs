// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis orchestration.
//!
//! One [`Analyzer::analyze`] call selects a model, resolves the effective
//! configuration, sends the system prompt and the user prompt under the
//! retry policy, and packages the first choice with its metadata.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use regua_config::AnalysisSettings;
use regua_core::{
    AnalysisConfig, AnalysisMetadata, AnalysisOverrides, AnalysisRequest, AnalysisResponse,
    ChatMessage, ChatProvider, CompletionRequest, ProviderError, ReguaError,
};
use regua_resilience::{RetryPolicy, retry_with_backoff};
use tracing::info;

use crate::selector::ModelSelector;

/// Presence penalty applied to every analysis call.
pub const PRESENCE_PENALTY: f32 = 0.1;

/// Frequency penalty applied to every analysis call.
pub const FREQUENCY_PENALTY: f32 = 0.1;

/// Defaults used when the caller does not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationDefaults {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.0,
        }
    }
}

/// Runs analyses against a [`ChatProvider`].
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct Analyzer {
    provider: Arc<dyn ChatProvider>,
    selector: ModelSelector,
    retry: RetryPolicy,
    defaults: GenerationDefaults,
    system_prompt: String,
    deadline: Option<Duration>,
}

impl Analyzer {
    /// Creates an analyzer with default generation settings, default retry
    /// policy, no selection cache and no deadline.
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        candidates: Vec<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            selector: ModelSelector::new(candidates),
            retry: RetryPolicy::default(),
            defaults: GenerationDefaults::default(),
            system_prompt: system_prompt.into(),
            deadline: None,
        }
    }

    /// Creates an analyzer wired from the `[analysis]` configuration section.
    pub fn from_settings(
        provider: Arc<dyn ChatProvider>,
        candidates: Vec<String>,
        settings: &AnalysisSettings,
        system_prompt: impl Into<String>,
    ) -> Self {
        let deadline = (settings.request_timeout_secs > 0)
            .then(|| Duration::from_secs(settings.request_timeout_secs));

        Self {
            provider,
            selector: ModelSelector::new(candidates)
                .with_cache_ttl(Duration::from_secs(settings.model_cache_ttl_secs)),
            retry: RetryPolicy::new(
                settings.max_attempts,
                Duration::from_millis(settings.backoff_base_ms),
            ),
            defaults: GenerationDefaults {
                max_tokens: settings.default_max_tokens,
                temperature: settings.default_temperature,
            },
            system_prompt: system_prompt.into(),
            deadline,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_selector(mut self, selector: ModelSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Bounds a whole analysis (selection plus retries) by `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn candidates(&self) -> &[String] {
        self.selector.candidates()
    }

    /// Merges caller overrides over the defaults for the selected model.
    pub fn resolve_config(&self, model: &str, overrides: &AnalysisOverrides) -> AnalysisConfig {
        AnalysisConfig {
            model: model.to_string(),
            max_tokens: overrides.max_tokens.unwrap_or(self.defaults.max_tokens),
            temperature: overrides.temperature.unwrap_or(self.defaults.temperature),
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
        }
    }

    /// Produces an analysis for an already validated request.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ReguaError> {
        match self.deadline {
            Some(duration) => tokio::time::timeout(duration, self.run(request))
                .await
                .map_err(|_| ReguaError::Timeout { duration })?,
            None => self.run(request).await,
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ReguaError> {
        let model = self.selector.select(self.provider.as_ref()).await?;
        let config = self.resolve_config(&model, &request.overrides);

        info!(
            model = %config.model,
            max_tokens = config.max_tokens,
            temperature = config.temperature,
            prompt_chars = request.prompt.chars().count(),
            "starting analysis"
        );

        let completion = CompletionRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(request.prompt.as_str()),
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            presence_penalty: Some(config.presence_penalty),
            frequency_penalty: Some(config.frequency_penalty),
        };

        let result = retry_with_backoff(&self.retry, |attempt| {
            let completion = completion.clone();
            async move {
                info!(
                    attempt,
                    model = %completion.model,
                    messages = completion.messages.len(),
                    "calling provider"
                );
                self.provider.complete(completion).await.inspect(|r| {
                    info!(
                        attempt,
                        tokens_used = r.tokens_used,
                        finish_reason = r.finish_reason.as_deref().unwrap_or("unknown"),
                        "provider call completed"
                    );
                })
            }
        })
        .await
        .inspect_err(|e| {
            if matches!(e, ProviderError::ModelUnavailable { .. }) {
                self.selector.invalidate(&config.model);
            }
        })?;

        let analysis = result
            .text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ReguaError::EmptyResponse {
                model: config.model.clone(),
            })?;

        info!(
            model = %config.model,
            tokens_used = result.tokens_used,
            finish_reason = result.finish_reason.as_deref().unwrap_or("unknown"),
            "analysis completed"
        );

        Ok(AnalysisResponse {
            analysis,
            metadata: AnalysisMetadata {
                model: config.model,
                tokens_used: result.tokens_used,
                finish_reason: result.finish_reason,
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        })
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("provider", &self.provider.name())
            .field("selector", &self.selector)
            .field("retry", &self.retry)
            .field("defaults", &self.defaults)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
