// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat provider for deterministic testing.
//!
//! `MockProvider` implements `ChatProvider` without any network access.
//! Availability probes succeed unless the model was marked unavailable;
//! analysis calls pop scripted outcomes from a FIFO queue. Every request is
//! recorded so tests can assert on call counts and payloads.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use regua_core::{ChatProvider, CompletionRequest, CompletionResult, ProviderError};

/// Text returned for analysis calls once the script is exhausted.
pub const DEFAULT_REPLY: &str = "mock analysis";

/// Token count reported for scripted replies.
pub const MOCK_TOKENS: u32 = 30;

/// A scripted chat provider.
#[derive(Default)]
pub struct MockProvider {
    unavailable: HashMap<String, ProviderError>,
    script: Mutex<VecDeque<Result<Option<String>, ProviderError>>>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a mock where every model is available and every analysis
    /// returns [`DEFAULT_REPLY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Make probes (and analysis calls) for `model` fail with `error`.
    pub fn with_unavailable_model(mut self, model: &str, error: ProviderError) -> Self {
        self.unavailable.insert(model.to_string(), error);
        self
    }

    /// Queue a successful analysis reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.push(Ok(Some(text.to_string())));
        self
    }

    /// Queue a successful analysis reply that carries no text.
    pub fn with_empty_reply(self) -> Self {
        self.push(Ok(None));
        self
    }

    /// Queue a failed analysis call.
    pub fn with_failure(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, outcome: Result<Option<String>, ProviderError>) {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(outcome);
    }

    /// All requests received so far, in order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Models that received an availability probe, in order.
    pub fn probed_models(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(is_probe)
            .map(|r| r.model)
            .collect()
    }

    /// Requests that were real analysis calls (not probes).
    pub fn analysis_calls(&self) -> Vec<CompletionRequest> {
        self.calls()
            .into_iter()
            .filter(|r| !is_probe(r))
            .collect()
    }
}

/// Whether `request` is the selector's minimal availability probe.
pub fn is_probe(request: &CompletionRequest) -> bool {
    *request == CompletionRequest::probe(request.model.as_str())
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request.clone());

        if let Some(error) = self.unavailable.get(&request.model) {
            return Err(error.clone());
        }

        let text = if is_probe(&request) {
            Some("ok".to_string())
        } else {
            let next = self
                .script
                .lock()
                .expect("mock script lock poisoned")
                .pop_front();
            next.unwrap_or_else(|| Ok(Some(DEFAULT_REPLY.to_string())))?
        };

        Ok(CompletionResult {
            text,
            tokens_used: MOCK_TOKENS,
            finish_reason: Some("stop".to_string()),
            model: request.model,
        })
    }
}
