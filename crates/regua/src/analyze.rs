// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `regua analyze`: one-shot analysis from the command line.
//!
//! Builds the same JSON body an HTTP caller would send and prints the
//! success or error envelope to stdout.

use std::io::Read;

use clap::Args;
use regua_analysis::{ErrorBody, SuccessBody, analyze_body, classify};
use regua_config::ReguaConfig;
use regua_core::ReguaError;
use serde_json::{Map, Value, json};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Prompt to analyze. Read from stdin when omitted.
    pub prompt: Option<String>,

    /// Override the maximum number of generated tokens (1-4000).
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Override the sampling temperature (0-2).
    #[arg(long)]
    pub temperature: Option<f64>,
}

pub async fn run_analyze(config: ReguaConfig, args: AnalyzeArgs) -> Result<(), ReguaError> {
    let prompt = match args.prompt.clone() {
        Some(prompt) => prompt,
        None => read_stdin()?,
    };
    let body = request_body(&prompt, &args);

    let analyzer = crate::build_analyzer(&config).await?;
    match analyze_body(analyzer.as_deref(), &body).await {
        Ok(response) => {
            print_json(&SuccessBody::from(response))?;
            Ok(())
        }
        Err(err) => {
            let classified = classify(&err);
            print_json(&ErrorBody::from(classified))?;
            Err(err)
        }
    }
}

fn read_stdin() -> Result<String, ReguaError> {
    let mut prompt = String::new();
    std::io::stdin()
        .read_to_string(&mut prompt)
        .map_err(|e| ReguaError::Internal(format!("failed to read prompt from stdin: {e}")))?;
    Ok(prompt)
}

/// Encodes the prompt and overrides as an HTTP-style request body.
fn request_body(prompt: &str, args: &AnalyzeArgs) -> Vec<u8> {
    let mut config = Map::new();
    if let Some(max_tokens) = args.max_tokens {
        config.insert("max_tokens".into(), json!(max_tokens));
    }
    if let Some(temperature) = args.temperature {
        config.insert("temperature".into(), json!(temperature));
    }

    let mut body = json!({ "prompt": prompt });
    if !config.is_empty() {
        body["config"] = Value::Object(config);
    }
    body.to_string().into_bytes()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ReguaError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ReguaError::Internal(format!("failed to encode response: {e}")))?;
    println!("{text}");
    Ok(())
}
