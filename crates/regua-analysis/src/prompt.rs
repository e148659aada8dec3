// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scoring-methodology system prompt.

use regua_config::AnalysisSettings;
use regua_core::ReguaError;
use tracing::{info, warn};

/// Built-in system prompt establishing the Régua 3.0 scoring methodology.
pub const SCORING_SYSTEM_PROMPT: &str = r#"You are an expert in strategic analysis using the "Régua 3.0" methodology.

RÉGUA 3.0 METHODOLOGY:
Régua 3.0 is an analysis tool that rates situations on a scale from 1 to 10, considering multiple dimensions and providing actionable insights.

ANALYSIS STRUCTURE:
1. **Dimensional Analysis**: Rate each relevant aspect on a 1-10 scale
2. **Overall Score**: Weighted average of the dimensions
3. **Strategic Insights**: Identification of patterns and opportunities
4. **Actionable Recommendations**: Concrete next steps
5. **Scenarios**: Optimistic, realistic and pessimistic projections

EVALUATION CRITERIA:
- 1-3: Critical/Problematic
- 4-6: Moderate/Developing
- 7-8: Good/Satisfactory
- 9-10: Excellent/Exceptional

RESPONSE FORMAT:
Provide a structured, objective and actionable analysis, always justifying the scores assigned."#;

/// Resolves the system prompt.
///
/// Order: `system_prompt_file` > `system_prompt` > built-in. An unreadable
/// file is a configuration error; an empty one falls back to the built-in.
pub async fn load_system_prompt(settings: &AnalysisSettings) -> Result<String, ReguaError> {
    if let Some(path) = &settings.system_prompt_file {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ReguaError::Config(format!("failed to read system prompt file {path}: {e}"))
        })?;
        if content.trim().is_empty() {
            warn!(path = %path, "system prompt file is empty, using built-in prompt");
            return Ok(SCORING_SYSTEM_PROMPT.to_string());
        }
        info!(path = %path, "loaded system prompt from file");
        return Ok(content);
    }

    Ok(settings
        .system_prompt
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| SCORING_SYSTEM_PROMPT.to_string()))
}
