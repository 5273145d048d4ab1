//! Per-request resolution orchestration.
//!
//! One request is a single linear traversal with two decision points:
//!
//! ```text
//! START -> FETCHING -> { INDEXED -> { FOUND -> EXTRACTED -> DONE(success)
//!                                     | NOT_FOUND -> DONE(soft-fail) }
//!                        | FETCH_FAILED -> DONE(hard-fail) }
//! ```
//!
//! No state is re-entered. Every outcome leaves [`Resolver::resolve`] as a
//! [`ResolutionResult`]; errors never cross the boundary as `Err`.

use crate::backend::DocumentBackend;
use crate::cache::ResultCache;
use crate::index::DocumentIndex;
use std::time::Duration;
use umbra_common::{ResolutionResult, ResolveError};

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Fixed per deployment; never taken from the caller.
    pub base_url: String,
    /// Deadline for one fetch/render attempt.
    pub timeout: Duration,
    /// Additional attempts after a transport failure.
    pub retries: u32,
    /// Base delay between attempts; grows linearly with the attempt number.
    pub backoff: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            base_url: "https://www.astro.gsu.edu/AGNmass/".into(),
            timeout: Duration::from_secs(20),
            retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

pub struct Resolver {
    backend: Box<dyn DocumentBackend>,
    strategy: Box<dyn DocumentIndex>,
    options: ResolverOptions,
    cache: Option<ResultCache>,
}

impl Resolver {
    pub fn new(
        backend: Box<dyn DocumentBackend>,
        strategy: Box<dyn DocumentIndex>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            backend,
            strategy,
            options,
            cache: None,
        }
    }

    /// Attach an injected result cache. Without one, every request goes to
    /// the remote document.
    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Resolve `name` to its mass reading.
    ///
    /// Cancellation-safe: dropping the returned future aborts the in-flight
    /// fetch, and backend resources are reclaimed by their own guards.
    pub async fn resolve(&mut self, name: &str) -> ResolutionResult {
        if name.is_empty() {
            // Contract violation; fail before any I/O.
            tracing::warn!("rejected empty query name");
            return ResolutionResult::from_error(name, &ResolveError::Validation);
        }

        if let Some(cache) = &mut self.cache {
            if let Some(hit) = cache.get(name) {
                tracing::debug!(name, "cache hit");
                return hit;
            }
        }

        let result = match self.resolve_inner(name).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(name, error = %err, retryable = err.is_retryable(), "resolution failed");
                ResolutionResult::from_error(name, &err)
            }
        };

        if let Some(cache) = &mut self.cache {
            cache.insert(&result);
        }
        result
    }

    /// Release backend resources. Safe to call more than once.
    pub async fn shutdown(&mut self) -> Result<(), ResolveError> {
        self.backend.close().await?;
        Ok(())
    }

    async fn resolve_inner(&mut self, name: &str) -> Result<ResolutionResult, ResolveError> {
        let nav = self.fetch_with_retry().await?;
        let source = nav.url;
        tracing::debug!(%source, title = %nav.title, "document loaded");

        let index = self.strategy.build_index(self.backend.as_mut()).await?;
        let Some(&position) = index.get(name) else {
            return Err(ResolveError::NotFound {
                name: name.to_string(),
                source,
            });
        };
        tracing::debug!(name, position, "name resolved");

        let mass = self
            .strategy
            .extract_at(self.backend.as_mut(), position)
            .await?;
        Ok(match mass {
            Some(text) if !text.is_empty() => ResolutionResult::success(name, text, source),
            // Row exists but the mass field is absent or empty: soft
            // degradation, not a failure.
            _ => ResolutionResult::attribute_missing(name, source),
        })
    }

    /// FETCHING: load the document under the configured deadline, retrying
    /// transport faults with linear backoff. Structural outcomes are never
    /// retried here.
    async fn fetch_with_retry(
        &mut self,
    ) -> Result<crate::backend::NavigationResult, ResolveError> {
        let mut last_error = String::new();

        for attempt in 0..=self.options.retries {
            if attempt > 0 {
                let delay = self.options.backoff * attempt;
                tracing::debug!(attempt, ?delay, "retrying fetch");
                tokio::time::sleep(delay).await;
            }

            if !self.backend.is_ready().await {
                if let Err(err) = self.backend.launch().await {
                    last_error = err.to_string();
                    continue;
                }
            }

            let fetch = self.backend.navigate(&self.options.base_url);
            match tokio::time::timeout(self.options.timeout, fetch).await {
                Ok(Ok(nav)) => return Ok(nav),
                Ok(Err(err)) => last_error = err.to_string(),
                Err(_) => {
                    last_error = format!("timed out after {:?}", self.options.timeout);
                    // The renderer may be wedged mid-navigation; tear it down
                    // so the next attempt starts clean.
                    if let Err(err) = self.backend.close().await {
                        tracing::debug!(error = %err, "backend close after timeout failed");
                    }
                }
            }
            tracing::debug!(attempt, error = %last_error, "fetch attempt failed");
        }

        Err(ResolveError::Transport(last_error))
    }
}
