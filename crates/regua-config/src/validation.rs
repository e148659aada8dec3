// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ReguaConfig;

/// Upper bound shared with request validation for `max_tokens`.
const MAX_TOKENS_LIMIT: u32 = 4000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &ReguaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if !config.server.path.starts_with('/') {
        fail(format!(
            "server.path must start with `/`, got `{}`",
            config.server.path
        ));
    }

    if config.openai.base_url.trim().is_empty() {
        fail("openai.base_url must not be empty".to_string());
    }

    if config.openai.models.is_empty() {
        fail("openai.models must list at least one candidate model".to_string());
    }

    if config.openai.models.iter().any(|m| m.trim().is_empty()) {
        fail("openai.models must not contain empty model names".to_string());
    }

    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be at least 1".to_string());
    }

    let analysis = &config.analysis;
    if !(1..=MAX_TOKENS_LIMIT).contains(&analysis.default_max_tokens) {
        fail(format!(
            "analysis.default_max_tokens must be between 1 and {MAX_TOKENS_LIMIT}, got {}",
            analysis.default_max_tokens
        ));
    }

    if !(0.0..=2.0).contains(&analysis.default_temperature) {
        fail(format!(
            "analysis.default_temperature must be between 0 and 2, got {}",
            analysis.default_temperature
        ));
    }

    if analysis.max_attempts == 0 {
        fail("analysis.max_attempts must be at least 1".to_string());
    }

    if !matches!(
        config.logging.level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        fail(format!(
            "logging.level `{}` is not one of trace, debug, info, warn, error",
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
