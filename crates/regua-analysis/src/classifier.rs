// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps failures to HTTP-facing status codes and caller-safe messages.

use regua_core::{ProviderError, ReguaError, ValidationError};

/// Label used for every failure raised after validation succeeded.
pub const ANALYSIS_FAILED: &str = "analysis failed";

/// HTTP-facing view of a failure. Carries no diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: u16,
    /// Short category label (the `error` field of the response body).
    pub error: &'static str,
    /// Caller-facing explanation (the `message` field).
    pub message: &'static str,
    /// Whether the response body carries a `timestamp`.
    pub include_timestamp: bool,
}

impl ClassifiedError {
    const fn input(error: &'static str, message: &'static str) -> Self {
        Self {
            status: 400,
            error,
            message,
            include_timestamp: false,
        }
    }

    const fn analysis(status: u16, message: &'static str) -> Self {
        Self {
            status,
            error: ANALYSIS_FAILED,
            message,
            include_timestamp: true,
        }
    }
}

/// Classifies `err`. Every variant has exactly one mapping.
pub fn classify(err: &ReguaError) -> ClassifiedError {
    match err {
        ReguaError::Validation(v) => classify_validation(v),
        ReguaError::MissingApiKey => ClassifiedError {
            status: 500,
            error: "invalid configuration",
            message: "API key is not configured",
            include_timestamp: false,
        },
        ReguaError::Config(_) => ClassifiedError {
            status: 500,
            error: "invalid configuration",
            message: "service configuration error",
            include_timestamp: false,
        },
        ReguaError::Provider(p) => classify_provider(p),
        ReguaError::NoModelAvailable { .. } => {
            ClassifiedError::analysis(502, "models temporarily unavailable")
        }
        ReguaError::Timeout { .. } => ClassifiedError::analysis(504, "analysis deadline exceeded"),
        ReguaError::EmptyResponse { .. } | ReguaError::Internal(_) => {
            ClassifiedError::analysis(500, "internal server error")
        }
    }
}

/// Classifies a request body rejected for exceeding the transport size limit.
///
/// Uses the prompt-length labels with a 413 status; the body was never parsed.
pub fn classify_oversized_body() -> ClassifiedError {
    ClassifiedError {
        status: 413,
        ..classify_validation(&ValidationError::PromptTooLong { length: 0 })
    }
}

fn classify_validation(err: &ValidationError) -> ClassifiedError {
    match err {
        ValidationError::MalformedBody => {
            ClassifiedError::input("invalid JSON", "request body is not valid JSON")
        }
        ValidationError::MissingPrompt => ClassifiedError::input(
            "invalid data",
            "field \"prompt\" is required and must be a non-empty string",
        ),
        ValidationError::PromptTooLong { .. } => ClassifiedError::input(
            "prompt too long",
            "prompt must be at most 50,000 characters",
        ),
        ValidationError::InvalidMaxTokens => ClassifiedError::input(
            "invalid configuration",
            "max_tokens must be a number between 1 and 4000",
        ),
        ValidationError::InvalidTemperature => ClassifiedError::input(
            "invalid configuration",
            "temperature must be a number between 0 and 2",
        ),
    }
}

fn classify_provider(err: &ProviderError) -> ClassifiedError {
    match err {
        ProviderError::Auth { .. } => ClassifiedError::analysis(401, "authentication error"),
        ProviderError::RateLimited { .. } => ClassifiedError::analysis(429, "usage limit reached"),
        ProviderError::ModelUnavailable { .. } => {
            ClassifiedError::analysis(502, "models temporarily unavailable")
        }
        ProviderError::UpstreamHttp { .. } => {
            ClassifiedError::analysis(502, "upstream communication error")
        }
        ProviderError::Transport { .. } | ProviderError::Decode { .. } => {
            ClassifiedError::analysis(500, "internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn provider(err: ProviderError) -> ReguaError {
        ReguaError::Provider(err)
    }

    #[test]
    fn validation_failures_are_400_without_timestamp() {
        for v in [
            ValidationError::MalformedBody,
            ValidationError::MissingPrompt,
            ValidationError::PromptTooLong { length: 60_000 },
            ValidationError::InvalidMaxTokens,
            ValidationError::InvalidTemperature,
        ] {
            let c = classify(&ReguaError::Validation(v.clone()));
            assert_eq!(c.status, 400, "{v:?}");
            assert!(!c.include_timestamp);
        }
    }

    #[test]
    fn prompt_length_is_not_echoed() {
        let c = classify(&ValidationError::PromptTooLong { length: 60_000 }.into());
        assert!(!c.message.contains("60"));
    }

    #[test]
    fn oversized_body_uses_prompt_length_labels() {
        let c = classify_oversized_body();
        assert_eq!(c.status, 413);
        assert_eq!(c.error, "prompt too long");
        assert_eq!(c.message, "prompt must be at most 50,000 characters");
        assert!(!c.include_timestamp);
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let c = classify(&ReguaError::MissingApiKey);
        assert_eq!((c.status, c.error), (500, "invalid configuration"));
        assert!(!c.include_timestamp);
    }

    #[test]
    fn provider_failures_map_to_documented_statuses() {
        let cases = [
            (ProviderError::Auth { message: "bad key".into() }, 401, "authentication error"),
            (
                ProviderError::RateLimited { message: "quota".into() },
                429,
                "usage limit reached",
            ),
            (
                ProviderError::ModelUnavailable {
                    model: "gpt-4o".into(),
                    message: "gone".into(),
                },
                502,
                "models temporarily unavailable",
            ),
            (
                ProviderError::UpstreamHttp {
                    status: 503,
                    message: "overloaded".into(),
                },
                502,
                "upstream communication error",
            ),
            (ProviderError::Transport { message: "reset".into() }, 500, "internal server error"),
            (ProviderError::Decode { message: "eof".into() }, 500, "internal server error"),
        ];
        for (err, status, message) in cases {
            let c = classify(&provider(err));
            assert_eq!((c.status, c.message), (status, message));
            assert_eq!(c.error, ANALYSIS_FAILED);
            assert!(c.include_timestamp);
        }
    }

    #[test]
    fn orchestration_failures_carry_timestamp() {
        let no_model = classify(&ReguaError::NoModelAvailable { tried: vec!["a".into()] });
        assert_eq!(no_model.status, 502);
        assert!(no_model.include_timestamp);

        let timeout = classify(&ReguaError::Timeout {
            duration: Duration::from_secs(120),
        });
        assert_eq!(timeout.status, 504);

        let empty = classify(&ReguaError::EmptyResponse { model: "m".into() });
        assert_eq!(empty.status, 500);
    }

    #[test]
    fn message_text_does_not_influence_classification() {
        // Upstream text mentioning quota stays an upstream error.
        let c = classify(&provider(ProviderError::UpstreamHttp {
            status: 500,
            message: "quota rate limit api key".into(),
        }));
        assert_eq!(c.status, 502);
    }
}
