// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the analysis route and health check.

use axum::{
    Json,
    body::Bytes,
    extract::{
        State,
        rejection::{BytesRejection, FailedToBufferBody},
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use regua_analysis::{
    ClassifiedError, ErrorBody, SuccessBody, analyze_body, classify, classify_oversized_body,
};
use regua_core::{ReguaError, ValidationError};
use serde::Serialize;
use tracing::Instrument;

use crate::server::AppState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST on the analysis route.
///
/// The body is read as raw bytes so malformed JSON is reported through the
/// same error envelope as every other input failure. A body the transport
/// refuses to buffer is answered with that envelope too.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("analyze", request_id = %request_id);

    async move {
        let body = match body {
            Ok(body) => body,
            // A missing key is reported before the body is looked at.
            Err(_) if state.analyzer.is_none() => Bytes::new(),
            Err(rejection) => return body_rejected(&rejection),
        };
        tracing::info!(method = "POST", body_bytes = body.len(), "analysis request received");

        match analyze_body(state.analyzer.as_deref(), &body).await {
            Ok(response) => {
                tracing::info!(
                    model = %response.metadata.model,
                    tokens_used = response.metadata.tokens_used,
                    "analysis succeeded"
                );
                (StatusCode::OK, Json(SuccessBody::from(response))).into_response()
            }
            Err(err) => {
                let classified = classify(&err);
                if classified.status >= 500 {
                    tracing::error!(error = %err, status = classified.status, "analysis request failed");
                } else {
                    tracing::warn!(error = %err, status = classified.status, "analysis request failed");
                }
                error_response(classified)
            }
        }
    }
    .instrument(span)
    .await
}

fn body_rejected(rejection: &BytesRejection) -> Response {
    let classified = match rejection {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
            classify_oversized_body()
        }
        _ => classify(&ReguaError::Validation(ValidationError::MalformedBody)),
    };
    tracing::warn!(
        reason = %rejection.body_text(),
        status = classified.status,
        "request body rejected"
    );
    error_response(classified)
}

fn error_response(classified: ClassifiedError) -> Response {
    let status =
        StatusCode::from_u16(classified.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::from(classified))).into_response()
}

/// OPTIONS on the analysis route: CORS preflight, empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the analysis route.
pub async fn method_not_allowed(method: Method) -> Response {
    tracing::warn!(method = %method, "method not allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new(
            "method not allowed",
            "use POST to submit data for analysis",
        )),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
