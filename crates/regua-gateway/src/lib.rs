// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Regua analysis service.
//!
//! Serves the analysis route (POST analyze, OPTIONS preflight, 405 for
//! everything else) with permissive CORS headers, plus an unauthenticated
//! `/health` route.

pub mod handlers;
pub mod server;

pub use server::{AppState, build_router, start_server};
