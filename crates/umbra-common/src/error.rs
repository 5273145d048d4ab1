use std::time::Duration;
use thiserror::Error;

/// Faults raised by a document backend (static fetcher or headless renderer).
///
/// All of these are transport-layer problems: the document could not be
/// reached, rendered or queried. A name that is simply absent from a
/// successfully loaded document is *not* a backend error.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend not launched")]
    NotReady,

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("page evaluation failed: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failure taxonomy of a resolution request.
///
/// `AttributeMissing` is deliberately absent: a found name whose mass field
/// cannot be read degrades to a sentinel value, it never becomes an error.
// Implemented by hand rather than via `thiserror` because the `NotFound`
// variant's `source` field is a document URL, not a chained error, and
// thiserror unconditionally treats a field named `source` as the cause.
#[derive(Debug)]
pub enum ResolveError {
    /// The caller supplied an empty query. Raised before any I/O.
    Validation,

    /// The document could not be fetched, rendered or queried.
    /// Possibly transient; the only retryable kind.
    Transport(String),

    /// The document was reached but the name is not in its index.
    /// Definitive for the consulted document; never retryable.
    NotFound { name: String, source: String },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Validation => write!(f, "query name must not be empty"),
            ResolveError::Transport(msg) => write!(f, "transport failure: {msg}"),
            ResolveError::NotFound { name, source } => {
                write!(f, "'{name}' not found in {source}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

impl ResolveError {
    /// Whether the caller may reasonably retry the request with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::Transport(_))
    }
}

impl From<BackendError> for ResolveError {
    fn from(err: BackendError) -> Self {
        ResolveError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_is_retryable() {
        assert!(ResolveError::Transport("dns".into()).is_retryable());
        assert!(!ResolveError::Validation.is_retryable());
        assert!(
            !ResolveError::NotFound {
                name: "M87*".into(),
                source: "http://example.test/".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn backend_errors_map_to_transport() {
        let err: ResolveError = BackendError::NotReady.into();
        assert!(err.is_retryable());
    }
}
