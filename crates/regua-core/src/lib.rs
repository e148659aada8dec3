// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Regua analysis service.
//!
//! This crate provides the provider trait, error types, and request and
//! response types shared by the provider client, the analysis core, and
//! the HTTP gateway.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ProviderError, ReguaError, ValidationError, MAX_PROMPT_CHARS};
pub use traits::ChatProvider;
pub use types::{
    AnalysisConfig, AnalysisMetadata, AnalysisOverrides, AnalysisRequest, AnalysisResponse,
    ChatMessage, CompletionRequest, CompletionResult, Role,
};
