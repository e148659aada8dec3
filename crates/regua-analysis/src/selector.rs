// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model selection by availability probing.
//!
//! [`ModelSelector`] walks a ranked candidate list and returns the first
//! model that answers a one-token probe. Probes are never retried: a failed
//! probe just means "try the next one". An optional TTL cache remembers the
//! last winner so consecutive requests can skip probing.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use regua_core::{ChatProvider, CompletionRequest, ReguaError};
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct CachedModel {
    model: String,
    selected_at: Instant,
}

#[derive(Debug)]
struct ModelCache {
    ttl: Duration,
    slot: ArcSwapOption<CachedModel>,
}

/// Picks the most capable model the provider currently serves.
#[derive(Debug)]
pub struct ModelSelector {
    candidates: Vec<String>,
    cache: Option<ModelCache>,
}

impl ModelSelector {
    /// Creates a selector over `candidates`, most capable first. Caching is off.
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            cache: None,
        }
    }

    /// Reuse a selected model for `ttl` without probing. A zero TTL disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = (!ttl.is_zero()).then(|| ModelCache {
            ttl,
            slot: ArcSwapOption::empty(),
        });
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Returns the first candidate whose probe succeeds.
    ///
    /// Fails with [`ReguaError::NoModelAvailable`] when every probe fails.
    pub async fn select(&self, provider: &dyn ChatProvider) -> Result<String, ReguaError> {
        if let Some(model) = self.cached() {
            debug!(model = %model, "using cached model selection");
            return Ok(model);
        }

        for model in &self.candidates {
            info!(model = %model, provider = provider.name(), "probing model availability");
            match provider.complete(CompletionRequest::probe(model.as_str())).await {
                Ok(_) => {
                    info!(selected_model = %model, "model selected");
                    self.remember(model);
                    return Ok(model.clone());
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "model unavailable, trying next");
                }
            }
        }

        Err(ReguaError::NoModelAvailable {
            tried: self.candidates.clone(),
        })
    }

    /// Drops the cached selection if it is `model`.
    pub fn invalidate(&self, model: &str) {
        if let Some(cache) = &self.cache {
            let current = cache.slot.load_full();
            if current.as_ref().is_some_and(|c| c.model == model) {
                cache.slot.compare_and_swap(&current, None);
                debug!(model = %model, "evicted cached model selection");
            }
        }
    }

    fn cached(&self) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let entry = cache.slot.load_full()?;
        (entry.selected_at.elapsed() < cache.ttl).then(|| entry.model.clone())
    }

    fn remember(&self, model: &str) {
        if let Some(cache) = &self.cache {
            cache.slot.store(Some(Arc::new(CachedModel {
                model: model.to_string(),
                selected_at: Instant::now(),
            })));
        }
    }
}
