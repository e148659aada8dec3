// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the provider, analysis, and gateway crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A provider-neutral chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,
    /// Conversation messages, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional presence penalty.
    pub presence_penalty: Option<f32>,
    /// Optional frequency penalty.
    pub frequency_penalty: Option<f32>,
}

impl CompletionRequest {
    /// Builds the minimal single-token, zero-temperature availability probe.
    pub fn probe(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user("test")],
            max_tokens: 1,
            temperature: 0.0,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }
}

/// The provider's answer to a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    /// Generated text of the first choice, if any.
    pub text: Option<String>,
    /// Total tokens billed for the call (0 when the provider omits usage).
    pub tokens_used: u32,
    /// Why generation stopped (e.g., "stop", "length").
    pub finish_reason: Option<String>,
    /// Model that served the request, as reported by the provider.
    pub model: String,
}

/// Optional per-request overrides supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AnalysisOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl AnalysisOverrides {
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none() && self.temperature.is_none()
    }
}

/// A validated analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Non-blank prompt of at most 50,000 characters.
    pub prompt: String,
    pub overrides: AnalysisOverrides,
}

/// Configuration actually sent to the provider for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

/// Metadata returned alongside the generated analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub model: String,
    pub tokens_used: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

/// Result of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub metadata: AnalysisMetadata,
}
