// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-level tests for the analysis route.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use regua_analysis::Analyzer;
use regua_core::ProviderError;
use regua_gateway::{AppState, build_router};
use regua_test_utils::MockProvider;
use serde_json::Value;
use tower::ServiceExt;

const PATH: &str = "/analyze";

fn app_with(mock: &Arc<MockProvider>) -> Router {
    let analyzer = Analyzer::new(
        mock.clone(),
        vec!["gpt-4o".into(), "gpt-4".into(), "gpt-3.5-turbo".into()],
        "methodology",
    );
    build_router(AppState::new(Some(Arc::new(analyzer))), PATH)
}

fn post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn post_owned(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

#[tokio::test]
async fn successful_analysis_returns_envelope() {
    let mock = Arc::new(MockProvider::new().with_reply("Overall: 8/10"));
    let (status, _, body) = send(
        app_with(&mock),
        post(r#"{"prompt":"Evaluate our Q3 sales pipeline"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["analysis"], "Overall: 8/10");
    assert_eq!(body["data"]["metadata"]["model"], "gpt-4o");
    assert_eq!(body["data"]["metadata"]["tokensUsed"], 30);
    assert_eq!(body["data"]["metadata"]["finishReason"], "stop");
    assert!(body["data"]["metadata"]["timestamp"].is_string());
}

#[tokio::test]
async fn malformed_json_is_400_without_provider_call() {
    let mock = Arc::new(MockProvider::new());
    let (status, _, body) = send(app_with(&mock), post("not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid JSON");
    assert!(body.get("timestamp").is_none());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn blank_prompt_is_400_without_provider_call() {
    let mock = Arc::new(MockProvider::new());
    let (status, _, body) = send(app_with(&mock), post(r#"{"prompt":"  "}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid data");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn empty_body_is_missing_prompt() {
    let mock = Arc::new(MockProvider::new());
    let (status, _, body) = send(app_with(&mock), post("")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid data");
}

#[tokio::test]
async fn out_of_range_config_is_400() {
    let mock = Arc::new(MockProvider::new());
    let (status, _, body) = send(
        app_with(&mock),
        post(r#"{"prompt":"p","config":{"max_tokens":4001}}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "max_tokens must be a number between 1 and 4000");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn whitespace_only_body_is_invalid_json() {
    let mock = Arc::new(MockProvider::new());
    let (status, _, body) = send(app_with(&mock), post(" \n ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid JSON");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn long_prompt_under_body_limit_is_400() {
    let mock = Arc::new(MockProvider::new());
    let prompt = "a".repeat(regua_core::MAX_PROMPT_CHARS + 1);
    let (status, _, body) = send(
        app_with(&mock),
        post_owned(format!(r#"{{"prompt":"{prompt}"}}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "prompt too long");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn oversized_body_is_413_json_envelope() {
    let mock = Arc::new(MockProvider::new());
    let prompt = "a".repeat(3_000_000);
    let (status, headers, body) = send(
        app_with(&mock),
        post_owned(format!(r#"{{"prompt":"{prompt}"}}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body["error"], "prompt too long");
    assert_eq!(body["message"], "prompt must be at most 50,000 characters");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_api_key_is_500_configuration_error() {
    let app = build_router(AppState::new(None), PATH);
    let (status, _, body) = send(app, post(r#"{"prompt":"p"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "invalid configuration");
    assert_eq!(body["message"], "API key is not configured");
}

#[tokio::test]
async fn missing_api_key_is_checked_before_parsing() {
    let app = build_router(AppState::new(None), PATH);
    let (status, _, _) = send(app, post("not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn provider_auth_failure_is_401_with_timestamp() {
    let mock = Arc::new(
        MockProvider::new()
            .with_failure(ProviderError::Auth {
                message: "invalid key sk-abc".into(),
            })
            .with_failure(ProviderError::Auth {
                message: "invalid key sk-abc".into(),
            }),
    );
    let app = build_router(
        AppState::new(Some(Arc::new(
            Analyzer::new(mock.clone(), vec!["gpt-4o".into()], "m").with_retry_policy(
                regua_resilience::RetryPolicy::new(2, std::time::Duration::ZERO),
            ),
        ))),
        PATH,
    );
    let (status, _, body) = send(app, post(r#"{"prompt":"p"}"#)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "analysis failed");
    assert_eq!(body["message"], "authentication error");
    assert!(body["timestamp"].is_string());
    // Upstream detail never reaches the caller.
    assert!(!body.to_string().contains("sk-abc"));
}

#[tokio::test]
async fn no_model_available_is_502() {
    let unavailable = |m: &str| ProviderError::ModelUnavailable {
        model: m.into(),
        message: "gone".into(),
    };
    let mock = Arc::new(
        MockProvider::new()
            .with_unavailable_model("gpt-4o", unavailable("gpt-4o"))
            .with_unavailable_model("gpt-4", unavailable("gpt-4"))
            .with_unavailable_model("gpt-3.5-turbo", unavailable("gpt-3.5-turbo")),
    );
    let (status, _, body) = send(app_with(&mock), post(r#"{"prompt":"p"}"#)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "models temporarily unavailable");
}

#[tokio::test]
async fn options_preflight_is_200_with_cors() {
    let mock = Arc::new(MockProvider::new());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(PATH)
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app_with(&mock), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn other_methods_are_405() {
    let mock = Arc::new(MockProvider::new());
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method.clone())
            .uri(PATH)
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(app_with(&mock), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(body["error"], "method not allowed");
        assert_eq!(body["message"], "use POST to submit data for analysis");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn every_analysis_response_carries_cors_and_json_headers() {
    let mock = Arc::new(MockProvider::new());
    for request in [post(r#"{"prompt":"p"}"#), post("not json")] {
        let (_, headers, _) = send(app_with(&mock), request).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }
}

#[tokio::test]
async fn custom_path_is_honoured() {
    let mock = Arc::new(MockProvider::new());
    let app = build_router(
        AppState::new(Some(Arc::new(Analyzer::new(
            mock.clone(),
            vec!["gpt-4o".into()],
            "m",
        )))),
        "/.netlify/functions/analyze",
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/.netlify/functions/analyze")
        .body(Body::from(r#"{"prompt":"p"}"#))
        .unwrap();
    let (status, _, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_version() {
    let app = build_router(AppState::new(None), PATH);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
