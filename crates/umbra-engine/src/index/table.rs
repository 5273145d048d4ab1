//! Structured-table strategy: one results table, names in one column, masses
//! in a sibling column of the same row.

use super::{Confidence, DocumentIndex, NameIndex, index_rows, value_at};
use crate::backend::{DocumentBackend, RowSelector};
use async_trait::async_trait;
use umbra_common::BackendError;

/// Default selectors for the observed AGN mass table: name in the second
/// cell, mass in the third.
pub fn default_selector() -> RowSelector {
    RowSelector {
        row: "table tr".into(),
        key: "td:nth-of-type(2)".into(),
        value: "td:nth-of-type(3)".into(),
    }
}

pub struct TableIndex {
    selector: RowSelector,
}

impl TableIndex {
    pub fn new(selector: RowSelector) -> Self {
        Self { selector }
    }
}

impl Default for TableIndex {
    fn default() -> Self {
        Self::new(default_selector())
    }
}

#[async_trait]
impl DocumentIndex for TableIndex {
    async fn build_index(
        &self,
        backend: &mut dyn DocumentBackend,
    ) -> Result<NameIndex, BackendError> {
        let rows = backend.select_rows(&self.selector).await?;
        let index = index_rows(&rows);
        tracing::debug!(rows = rows.len(), names = index.len(), "table indexed");
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
