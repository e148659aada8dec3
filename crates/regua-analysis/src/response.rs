// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON envelopes returned to callers.

use chrono::{SecondsFormat, Utc};
use regua_core::AnalysisResponse;
use serde::Serialize;

use crate::classifier::ClassifiedError;

/// `{ "success": true, "data": { "analysis": ..., "metadata": ... } }`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub data: AnalysisResponse,
}

impl From<AnalysisResponse> for SuccessBody {
    fn from(data: AnalysisResponse) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "error": ..., "message": ..., "timestamp"?: ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: None,
        }
    }
}

impl From<ClassifiedError> for ErrorBody {
    fn from(classified: ClassifiedError) -> Self {
        Self {
            error: classified.error.to_string(),
            message: classified.message.to_string(),
            timestamp: classified
                .include_timestamp
                .then(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}
