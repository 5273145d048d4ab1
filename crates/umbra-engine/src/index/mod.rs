//! Document-index strategies.
//!
//! Each strategy knows how one family of source documents lays out its data:
//! a results table ([`TableIndex`]), an infobox of label/value rows
//! ([`InfoboxIndex`]), or a free-text article ([`FreeTextIndex`]). All three
//! sit behind [`DocumentIndex`] and are selected by configuration, never
//! mixed ad hoc.

pub mod freetext;
pub mod infobox;
pub mod table;

pub use freetext::FreeTextIndex;
pub use infobox::InfoboxIndex;
pub use table::TableIndex;

use crate::backend::{DocumentBackend, DocumentRow};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use umbra_common::BackendError;

/// Name → structural position, 1-based in document order.
pub type NameIndex = HashMap<String, usize>;

/// How much trust to place in an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Read from a dedicated field of a structured row.
    Structured,
    /// Pattern-matched out of prose; inherently lower confidence.
    BestEffort,
}

/// Builds a complete name index over a loaded document and extracts the mass
/// field at a resolved position.
///
/// The index is exhaustive: one pass over the whole repeating structure, no
/// early exit. Duplicate names overwrite, so the last occurrence wins.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Enumerate every candidate name and its 1-based position.
    async fn build_index(
        &self,
        backend: &mut dyn DocumentBackend,
    ) -> Result<NameIndex, BackendError>;

    /// Mass text at `position`. `Ok(None)` means the position exists but the
    /// mass field could not be located in the markup.
    async fn extract_at(
        &self,
        backend: &mut dyn DocumentBackend,
        position: usize,
    ) -> Result<Option<String>, BackendError>;

    fn confidence(&self) -> Confidence;
}

/// Index rows by their key cell. Rows without a key (header rows, spacer
/// rows) keep their position but contribute no entry.
pub(crate) fn index_rows(rows: &[DocumentRow]) -> NameIndex {
    let mut index = NameIndex::new();
    for (i, row) in rows.iter().enumerate() {
        if let Some(key) = &row.key {
            if !key.is_empty() {
                // Plain overwrite: later duplicates shadow earlier ones.
                index.insert(key.clone(), i + 1);
            }
        }
    }
    index
}

/// Value cell of the row at a 1-based position.
pub(crate) fn value_at(rows: &[DocumentRow], position: usize) -> Option<String> {
    position
        .checked_sub(1)
        .and_then(|i| rows.get(i))
        .and_then(|row| row.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: Option<&str>, value: Option<&str>) -> DocumentRow {
        DocumentRow {
            key: key.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn positions_are_one_based_document_order() {
        let rows = vec![
            row(Some("Sagittarius A*"), Some("4.3 x 10^6")),
            row(Some("M87*"), Some("6.5 x 10^9")),
        ];
        let index = index_rows(&rows);
        assert_eq!(index["Sagittarius A*"], 1);
        assert_eq!(index["M87*"], 2);
    }

    #[test]
    fn keyless_rows_still_occupy_positions() {
        let rows = vec![
            row(None, None), // header
            row(Some("M87*"), Some("6.5 x 10^9")),
        ];
        let index = index_rows(&rows);
        assert_eq!(index.len(), 1);
        assert_eq!(index["M87*"], 2);
        assert_eq!(value_at(&rows, 2).as_deref(), Some("6.5 x 10^9"));
    }

    #[test]
    fn duplicate_names_keep_last_occurrence() {
        let rows = vec![
            row(Some("NGC 4151"), Some("first")),
            row(Some("NGC 4151"), Some("second")),
        ];
        let index = index_rows(&rows);
        assert_eq!(index["NGC 4151"], 2);
        assert_eq!(value_at(&rows, index["NGC 4151"]).as_deref(), Some("second"));
    }

    #[test]
    fn value_at_is_defensive_about_bounds() {
        let rows = vec![row(Some("M87*"), None)];
        assert_eq!(value_at(&rows, 0), None);
        assert_eq!(value_at(&rows, 1), None);
        assert_eq!(value_at(&rows, 2), None);
    }
}
