//! Infobox strategy: label/value rows where the value sits in the cell next
//! to its matching label, Wikipedia-style.
//!
//! The index keys are the row labels, so a lookup resolves a field label
//! (e.g. "Mass") rather than scanning columns of a results table.

use super::{Confidence, DocumentIndex, NameIndex, index_rows, value_at};
use crate::backend::{DocumentBackend, RowSelector};
use async_trait::async_trait;
use umbra_common::BackendError;

/// Default selectors for a Wikipedia-style infobox.
pub fn default_selector() -> RowSelector {
    RowSelector {
        row: "table.infobox tr".into(),
        key: "th".into(),
        value: "td".into(),
    }
}

pub struct InfoboxIndex {
    selector: RowSelector,
}

impl InfoboxIndex {
    pub fn new(selector: RowSelector) -> Self {
        Self { selector }
    }
}

impl Default for InfoboxIndex {
    fn default() -> Self {
        Self::new(default_selector())
    }
}

#[async_trait]
impl DocumentIndex for InfoboxIndex {
    async fn build_index(
        &self,
        backend: &mut dyn DocumentBackend,
    ) -> Result<NameIndex, BackendError> {
        let rows = backend.select_rows(&self.selector).await?;
        let index = index_rows(&rows);
        tracing::debug!(rows = rows.len(), labels = index.len(), "infobox indexed");
        Ok(index)
    }

    async fn extract_at(
        &self,
        backend: &mut dyn DocumentBackend,
        position: usize,
    ) -> Result<Option<String>, BackendError> {
        let rows = backend.select_rows(&self.selector).await?;
        Ok(value_at(&rows, position))
    }

    fn confidence(&self) -> Confidence {
        Confidence::Structured
    }
}
