// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis core for the Regua service.
//!
//! Validates inbound requests, selects an available model, runs the
//! completion under a retry policy and classifies failures into
//! HTTP-facing errors. The HTTP gateway and the CLI both go through
//! [`analyze_body`].

pub mod classifier;
pub mod orchestrator;
pub mod prompt;
pub mod response;
pub mod selector;
pub mod validator;

use regua_core::{AnalysisResponse, ReguaError};
use tracing::{info, warn};

pub use classifier::{ClassifiedError, classify, classify_oversized_body};
pub use orchestrator::{Analyzer, FREQUENCY_PENALTY, GenerationDefaults, PRESENCE_PENALTY};
pub use prompt::{SCORING_SYSTEM_PROMPT, load_system_prompt};
pub use response::{ErrorBody, SuccessBody};
pub use selector::ModelSelector;
pub use validator::{parse_request, validate};

/// Runs one request body through the full pipeline.
///
/// `analyzer` is `None` when no provider API key is configured; that is
/// reported before the body is even parsed.
pub async fn analyze_body(
    analyzer: Option<&Analyzer>,
    body: &[u8],
) -> Result<AnalysisResponse, ReguaError> {
    let analyzer = analyzer.ok_or(ReguaError::MissingApiKey)?;

    let request = parse_request(body).inspect_err(|e| {
        warn!(reason = %e, "request rejected");
    })?;

    info!(
        prompt_chars = request.prompt.chars().count(),
        has_overrides = !request.overrides.is_empty(),
        "request validated, starting analysis"
    );

    analyzer.analyze(&request).await
}
