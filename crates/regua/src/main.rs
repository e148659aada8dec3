// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regua - Régua 3.0 strategic analysis service.
//!
//! This is the binary entry point: the HTTP server and a one-shot CLI
//! analysis share the same validation and orchestration path.

mod analyze;
mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use regua_analysis::{Analyzer, load_system_prompt};
use regua_config::{LogFormat, LoggingConfig, ReguaConfig};
use regua_core::ReguaError;
use regua_openai::OpenAiProvider;

/// Regua - Régua 3.0 strategic analysis service.
#[derive(Parser, Debug)]
#[command(name = "regua", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP analysis endpoint.
    Serve,
    /// Analyze a single prompt and print the JSON response.
    Analyze(analyze::AnalyzeArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => regua_config::load_and_validate_path(path),
        None => regua_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            regua_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Analyze(args)) => analyze::run_analyze(config, args).await,
    };

    if let Err(e) = result {
        eprintln!("regua: {e}");
        std::process::exit(1);
    }
}

/// Builds the analyzer, or `None` when no provider API key is available.
///
/// A missing key does not stop the process; callers answer every analysis
/// request with a configuration error instead.
async fn build_analyzer(config: &ReguaConfig) -> Result<Option<Arc<Analyzer>>, ReguaError> {
    let provider = match OpenAiProvider::new(&config.openai) {
        Ok(provider) => provider,
        Err(ReguaError::MissingApiKey) => {
            tracing::warn!(
                env = regua_openai::API_KEY_ENV,
                "OpenAI API key not configured, analysis requests will fail"
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let system_prompt = load_system_prompt(&config.analysis).await?;
    let analyzer = Analyzer::from_settings(
        Arc::new(provider),
        config.openai.models.clone(),
        &config.analysis,
        system_prompt,
    );

    tracing::info!(
        models = ?analyzer.candidates(),
        max_attempts = config.analysis.max_attempts,
        "analyzer ready"
    );
    Ok(Some(Arc::new(analyzer)))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `regua=<level>,warn`. Logs go to
/// stderr so `regua analyze` keeps stdout for the JSON result.
fn init_tracing(logging: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("regua={},warn", logging.level)));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}
