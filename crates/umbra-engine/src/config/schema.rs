//! Configuration schema.
//!
//! Everything has a serde default so a missing or partial file degrades to
//! the built-in deployment: the AGN mass table, scraped headlessly.

use crate::backend::RowSelector;
use crate::config::loader::ConfigError;
use crate::index::{self, DocumentIndex, FreeTextIndex, InfoboxIndex, TableIndex, freetext};
use crate::resolver::ResolverOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UmbraConfig {
    pub source: SourceConfig,
    pub strategy: StrategyConfig,
    pub backend: BackendConfig,
    pub cache: CacheConfig,
}

/// The remote document and how hard to try reaching it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Fixed per deployment; never derived from caller input.
    pub base_url: String,
    /// Timeout for one fetch/render attempt, in seconds.
    pub timeout_secs: u64,
    /// Additional attempts after a transport failure.
    pub retries: u32,
    /// Base delay between attempts, grows linearly, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.astro.gsu.edu/AGNmass/".into(),
            timeout_secs: 20,
            retries: 2,
            backoff_ms: 500,
        }
    }
}

/// Which document-index strategy to run, with optional selector overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Structured results table; name and mass in sibling columns.
    Table {
        #[serde(default)]
        selector: Option<RowSelector>,
    },
    /// Label/value infobox rows; the index keys are the labels.
    Infobox {
        #[serde(default)]
        selector: Option<RowSelector>,
    },
    /// Regex search across article prose. Best-effort.
    FreeText {
        #[serde(default)]
        blocks: Option<String>,
        #[serde(default)]
        pattern: Option<String>,
    },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Table { selector: None }
    }
}

impl StrategyConfig {
    /// Instantiate the configured strategy. A bad free-text pattern fails
    /// here, at load time, not during a request.
    pub fn build(&self) -> Result<Box<dyn DocumentIndex>, ConfigError> {
        match self {
            StrategyConfig::Table { selector } => Ok(Box::new(TableIndex::new(
                selector.clone().unwrap_or_else(index::table::default_selector),
            ))),
            StrategyConfig::Infobox { selector } => Ok(Box::new(InfoboxIndex::new(
                selector
                    .clone()
                    .unwrap_or_else(index::infobox::default_selector),
            ))),
            StrategyConfig::FreeText { blocks, pattern } => {
                let blocks = blocks.as_deref().unwrap_or(freetext::DEFAULT_BLOCK_SELECTOR);
                let pattern = pattern.as_deref().unwrap_or(freetext::DEFAULT_MASS_PATTERN);
                Ok(Box::new(FreeTextIndex::new(blocks, pattern)?))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Plain HTTP fetch, no script execution.
    Static,
    /// Chromium over CDP; required when the source needs rendering.
    Headless,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Upper bound on concurrently live renderer instances.
    pub max_renderers: usize,
    /// Launch the browser with a visible window (debugging).
    pub visible: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Headless,
            max_renderers: 2,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 300,
        }
    }
}

impl UmbraConfig {
    /// Validate the base URL and produce resolver options.
    pub fn resolver_options(&self) -> Result<ResolverOptions, ConfigError> {
        let base_url = Url::parse(&self.source.base_url)?;
        Ok(ResolverOptions {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.source.timeout_secs),
            retries: self.source.retries,
            backoff: Duration::from_millis(self.source.backoff_ms),
        })
    }
}
