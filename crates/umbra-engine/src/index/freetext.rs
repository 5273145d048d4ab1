//! Free-text strategy: lexical search over an article when no structured
//! table exists.
//!
//! Headings are the candidate names. Extraction scans the prose after the
//! matched heading for the first mass-like quantity (a number, optionally in
//! scientific notation, followed by a solar-mass unit token) and stops at the
//! next heading. Callers should treat results as lower-confidence than
//! structured extraction.

use super::{Confidence, DocumentIndex, NameIndex};
use crate::backend::DocumentBackend;
use async_trait::async_trait;
use regex::Regex;
use umbra_common::BackendError;

/// Elements scanned by default: section headings plus paragraph prose.
pub const DEFAULT_BLOCK_SELECTOR: &str = "h1, h2, h3, p";

/// A numeric token, optional scientific notation, optional magnitude word,
/// then a unit token meaning solar mass.
pub const DEFAULT_MASS_PATTERN: &str = r"(?i)\d[\d,.]*(?:\s*(?:[x×]\s*10\s*\^?\s*\d+|e[+-]?\d+))?\s*(?:billion|million|thousand)?\s*(?:solar\s+mass(?:es)?|M☉|M⊙|M_?sun)";

pub struct FreeTextIndex {
    block_selector: String,
    pattern: Regex,
}

impl FreeTextIndex {
    /// Compiles `pattern`; fails fast on an invalid expression so a bad
    /// config never reaches request time.
    pub fn new(block_selector: &str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            block_selector: block_selector.to_string(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Default for FreeTextIndex {
    fn default() -> Self {
        Self {
            block_selector: DEFAULT_BLOCK_SELECTOR.to_string(),
            pattern: default_pattern(),
        }
    }
}

/// Compiles [`DEFAULT_MASS_PATTERN`]. The pattern is a constant validated by
/// the tests below, so this cannot fail at runtime.
fn default_pattern() -> Regex {
    Regex::new(DEFAULT_MASS_PATTERN).expect("constant default mass pattern compiles")
}

#[async_trait]
impl DocumentIndex for FreeTextIndex {
    async fn build_index(
        &self,
        backend: &mut dyn DocumentBackend,
    ) -> Result<NameIndex, BackendError> {
        let blocks = backend.select_blocks(&self.block_selector).await?;
        let mut index = NameIndex::new();
        for (i, block) in blocks.iter().enumerate() {
            if block.is_heading() && !block.text.is_empty() {
                index.insert(block.text.clone(), i + 1);
            }
        }
        tracing::debug!(blocks = blocks.len(), headings = index.len(), "article indexed");
        Ok(index)
    }

    async fn extract_at(
        &self,
        backend: &mut dyn DocumentBackend,
        position: usize,
    ) -> Result<Option<String>, BackendError> {
        let blocks = backend.select_blocks(&self.block_selector).await?;
        if position == 0 || position > blocks.len() {
            return Ok(None);
        }
        // First match in document order within the matched section.
        for block in &blocks[position..] {
            if block.is_heading() {
                break;
            }
            if let Some(found) = self.pattern.find(&block.text) {
                return Ok(Some(found.as_str().to_string()));
            }
        }
        Ok(None)
    }

    fn confidence(&self) -> Confidence {
        Confidence::BestEffort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        default_pattern()
    }

    #[test]
    fn default_index_compiles_its_pattern() {
        let index = FreeTextIndex::default();
        assert_eq!(index.confidence(), Confidence::BestEffort);
    }

    #[test]
    fn matches_scientific_notation_with_unit() {
        let found = pattern()
            .find("estimated at 4.3 x 10^6 solar masses, based on orbits")
            .unwrap();
        assert_eq!(found.as_str(), "4.3 x 10^6 solar masses");
    }

    #[test]
    fn matches_magnitude_words_and_symbols() {
        assert!(pattern().is_match("roughly 6.5 billion solar masses"));
        assert!(pattern().is_match("about 4 × 10^6 M☉ in the core"));
    }

    #[test]
    fn plain_numbers_without_unit_do_not_match() {
        assert!(!pattern().is_match("discovered in 1974 near the core"));
    }
}
