// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Regua analysis service.

use std::time::Duration;

use thiserror::Error;

/// Maximum accepted prompt length, in UTF-16 code units.
pub const MAX_PROMPT_CHARS: usize = 50_000;

/// The primary error type used across all Regua crates.
#[derive(Debug, Error)]
pub enum ReguaError {
    /// Configuration errors (invalid TOML, unreadable prompt file, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// No provider API key was supplied through config or the environment.
    #[error("provider API key is not configured")]
    MissingApiKey,

    /// Caller input rejected before any provider call.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// A classified failure reported by the completion provider.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Every candidate model failed its availability probe.
    #[error("no model available (tried: {})", .tried.join(", "))]
    NoModelAvailable { tried: Vec<String> },

    /// The provider answered successfully but without any generated text.
    #[error("provider returned an empty completion for model {model}")]
    EmptyResponse { model: String },

    /// The analysis did not finish within the request deadline.
    #[error("analysis timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Reasons an inbound analysis request is rejected.
///
/// Checked in declaration order; the first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The body is not a JSON object.
    #[error("request body is not valid JSON")]
    MalformedBody,

    /// `prompt` is absent, not a string, or blank after trimming.
    #[error("field \"prompt\" is required and must be a non-empty string")]
    MissingPrompt,

    /// `prompt` exceeds [`MAX_PROMPT_CHARS`].
    #[error("prompt must be at most 50,000 characters (got {length})")]
    PromptTooLong { length: usize },

    /// `config.max_tokens` is not an integer in `[1, 4000]`.
    #[error("max_tokens must be a number between 1 and 4000")]
    InvalidMaxTokens,

    /// `config.temperature` is not a number in `[0, 2]`.
    #[error("temperature must be a number between 0 and 2")]
    InvalidTemperature,
}

/// Typed failure produced by a [`ChatProvider`](crate::ChatProvider).
///
/// Provider clients inspect upstream status codes and error bodies and
/// commit to one of these variants, so callers never match on message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The API key was missing, malformed, or rejected.
    #[error("authentication rejected: {message}")]
    Auth { message: String },

    /// Rate limit or quota exhausted.
    #[error("rate limit or quota exceeded: {message}")]
    RateLimited { message: String },

    /// The requested model does not exist or is not servable for this key.
    #[error("model `{model}` unavailable: {message}")]
    ModelUnavailable { model: String, message: String },

    /// Any other non-success HTTP status from the provider.
    #[error("upstream returned HTTP {status}: {message}")]
    UpstreamHttp { status: u16, message: String },

    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// A success response whose body could not be decoded.
    #[error("failed to decode provider response: {message}")]
    Decode { message: String },
}
