// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for chat-completion backends (OpenAI, test doubles).

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{CompletionRequest, CompletionResult};

/// A chat-completion backend.
///
/// Implementations own their transport and authentication and are injected
/// into the model selector and orchestrator, so a configured client is
/// reused across invocations without any process-wide state. Failures are
/// reported as typed [`ProviderError`] variants; implementations must not
/// retry internally.
#[async_trait]
pub trait ChatProvider: Send + Sync + 'static {
    /// Returns the human-readable name of this provider.
    fn name(&self) -> &str;

    /// Sends a single completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError>;
}
