//! The unified document-backend interface all renderers implement.
//!
//! A backend owns the transport: it loads the configured document and answers
//! structural queries against it. It never interprets the content: building
//! the name index and picking the mass field out of a row is the strategy's
//! job (see [`crate::index`]), so the rendering engine stays swappable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
pub use umbra_common::BackendError;

/// Where a successful navigation ended up.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
    pub status: u16,
}

/// CSS selectors describing a repeating key/value structure: `row` matches
/// each repeated element, `key` and `value` match cells within one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSelector {
    pub row: String,
    pub key: String,
    pub value: String,
}

/// One row of a repeating structure, in document order.
///
/// `None` means the cell is absent from the markup; `Some("")` means the cell
/// exists but is empty. The distinction feeds the tri-state result model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// A text-bearing element, tagged with its lowercased element name so the
/// free-text strategy can tell headings from body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub tag: String,
    pub text: String,
}

impl TextBlock {
    /// True for `h1`..`h6`.
    pub fn is_heading(&self) -> bool {
        let mut chars = self.tag.chars();
        chars.next() == Some('h')
            && matches!(chars.next(), Some(c) if c.is_ascii_digit())
            && chars.next().is_none()
    }
}

/// Trim and collapse internal whitespace runs.
///
/// Applied by every backend to all extracted text, so the index and the
/// extractor see identical normalization.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The interface every document backend must implement.
///
/// Backends are stateful within one request: `navigate` loads the document
/// and subsequent `select_*` calls query it.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Launch the backend (acquire a renderer, build an HTTP client, ...).
    async fn launch(&mut self) -> Result<(), BackendError>;

    /// Close the backend and release its resources.
    async fn close(&mut self) -> Result<(), BackendError>;

    /// Whether the backend can accept queries.
    async fn is_ready(&self) -> bool;

    /// Load the document at `url`.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError>;

    /// All rows matching `selector.row`, each with the normalized text of its
    /// first `key` and `value` descendants, in document order.
    async fn select_rows(&mut self, selector: &RowSelector)
    -> Result<Vec<DocumentRow>, BackendError>;

    /// Normalized text of every element matching `selector`, in document
    /// order, tagged with the element name.
    async fn select_blocks(&mut self, selector: &str) -> Result<Vec<TextBlock>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  4.3 \n x  10^6\t"), "4.3 x 10^6");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn heading_detection() {
        let h2 = TextBlock {
            tag: "h2".into(),
            text: String::new(),
        };
        let p = TextBlock {
            tag: "p".into(),
            text: String::new(),
        };
        let hr = TextBlock {
            tag: "hr".into(),
            text: String::new(),
        };
        assert!(h2.is_heading());
        assert!(!p.is_heading());
        assert!(!hr.is_heading());
    }
}
