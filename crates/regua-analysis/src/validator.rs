// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound request validation.
//!
//! Turns a raw request body into an [`AnalysisRequest`] or the first
//! [`ValidationError`] found. Pure: no I/O, no provider calls.

use regua_core::{AnalysisOverrides, AnalysisRequest, ValidationError, MAX_PROMPT_CHARS};
use serde_json::{Map, Value};

/// Inclusive bounds for `config.max_tokens`.
pub const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 1..=4000;

/// Inclusive bounds for `config.temperature`.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Parses and validates a raw request body.
///
/// An empty body is treated as `{}`. Anything else must parse as JSON.
pub fn parse_request(body: &[u8]) -> Result<AnalysisRequest, ValidationError> {
    if body.is_empty() {
        return validate(&Value::Object(Map::new()));
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;
    validate(&value)
}

/// Validates an already-parsed JSON value.
///
/// Checks run in a fixed order and the first failure is returned:
/// object shape, prompt presence, prompt length, `max_tokens`, `temperature`.
/// Unknown fields (including a caller-supplied `config.model`) are ignored.
pub fn validate(value: &Value) -> Result<AnalysisRequest, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::MalformedBody)?;

    let prompt = object
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.trim().is_empty())
        .ok_or(ValidationError::MissingPrompt)?;

    // UTF-16 code units.
    let length = prompt.encode_utf16().count();
    if length > MAX_PROMPT_CHARS {
        return Err(ValidationError::PromptTooLong { length });
    }

    let config = match object.get("config") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => return Err(ValidationError::MalformedBody),
    };

    let max_tokens = present(config, "max_tokens")
        .map(parse_max_tokens)
        .transpose()?;
    let temperature = present(config, "temperature")
        .map(parse_temperature)
        .transpose()?;

    Ok(AnalysisRequest {
        prompt: prompt.to_string(),
        overrides: AnalysisOverrides {
            max_tokens,
            temperature,
        },
    })
}

/// A config field that is set to something other than `null`.
fn present<'a>(config: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    config.and_then(|c| c.get(key)).filter(|v| !v.is_null())
}

fn parse_max_tokens(value: &Value) -> Result<u32, ValidationError> {
    let n = value.as_f64().ok_or(ValidationError::InvalidMaxTokens)?;
    let (low, high) = (*MAX_TOKENS_RANGE.start(), *MAX_TOKENS_RANGE.end());
    if n.fract() != 0.0 || n < f64::from(low) || n > f64::from(high) {
        return Err(ValidationError::InvalidMaxTokens);
    }
    Ok(n as u32)
}

fn parse_temperature(value: &Value) -> Result<f32, ValidationError> {
    let t = value.as_f64().ok_or(ValidationError::InvalidTemperature)?;
    if !TEMPERATURE_RANGE.contains(&t) {
        return Err(ValidationError::InvalidTemperature);
    }
    Ok(t as f32)
}
