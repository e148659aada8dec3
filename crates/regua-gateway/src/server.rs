// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, response headers, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, header},
    routing::{get, post},
};
use regua_analysis::Analyzer;
use regua_config::ServerConfig;
use regua_core::ReguaError;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when no provider API key is configured; every analysis
    /// request is then answered with a configuration error.
    pub analyzer: Option<Arc<Analyzer>>,
}

impl AppState {
    pub fn new(analyzer: Option<Arc<Analyzer>>) -> Self {
        Self { analyzer }
    }
}

/// Headers set on every response from the analysis route.
const ANALYZE_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (header::CONTENT_TYPE, "application/json"),
];

/// Largest request body the analysis route buffers.
///
/// A maximal prompt is 50,000 UTF-16 units; even fully `\uXXXX`-escaped
/// that stays well under this bound.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the application router with the analysis route mounted at `path`.
pub fn build_router(state: AppState, path: &str) -> Router {
    let mut analyze_routes = Router::new().route(
        path,
        post(handlers::analyze)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed)
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    );
    for (name, value) in ANALYZE_HEADERS {
        analyze_routes =
            analyze_routes.layer(SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)));
    }

    let public_routes = Router::new().route("/health", get(handlers::health));

    Router::new()
        .merge(analyze_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to `host:port` and serves until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), ReguaError> {
    let app = build_router(state, &config.path);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ReguaError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(path = %config.path, "Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReguaError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
