// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `regua serve`: run the HTTP analysis endpoint.

use regua_config::ReguaConfig;
use regua_core::ReguaError;
use regua_gateway::{AppState, start_server};
use tracing::info;

pub async fn run_serve(config: ReguaConfig) -> Result<(), ReguaError> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "starting regua"
    );

    let analyzer = crate::build_analyzer(&config).await?;
    start_server(&config.server, AppState::new(analyzer)).await?;

    info!("regua stopped");
    Ok(())
}
