//! The caller-facing result record of one resolution request.
//!
//! Every request terminates in exactly one `ResolutionResult`, whatever
//! happened on the way. Failures travel as data in the `error` field, never
//! as panics or errors thrown across the resolver boundary, so the layer
//! above can map outcomes to its own protocol uniformly.

use crate::error::ResolveError;
use serde::{Deserialize, Serialize};

/// Sentinel mass value for a name that is absent from the source document.
pub const NOT_FOUND: &str = "not found";

/// Sentinel mass value for a name that was found but whose mass field is
/// absent or empty in the markup.
pub const MASS_NOT_FOUND: &str = "mass not found";

/// Outcome of one lookup against a remote document.
///
/// Three shapes are possible, and all three must be kept distinct:
/// - success: `error` absent, `mass` holds the extracted text;
/// - partial success: `error` absent, `mass` is [`MASS_NOT_FOUND`]. The
///   document was reached and the name found, but the mass field was empty;
/// - failure: `error` present, `mass` is a sentinel.
///
/// The presence of `error`, not its text, is the authoritative signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The original query, echoed back unchanged.
    pub name: String,
    /// Extracted mass as free text (unit and magnitude embedded), or a
    /// sentinel. Never empty.
    pub mass: String,
    /// URL of the document that was consulted; empty if no request was made
    /// or the transport failed.
    pub source: String,
    /// Human-readable failure reason, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Coarse classification used by callers to map a result onto their own
/// protocol (HTTP status, exit code, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Mass extracted, or found with an empty mass field.
    Success,
    /// Document reached, name absent. Not retryable.
    SoftFail,
    /// Transport or validation failure. Transport faults may be retried.
    HardFail,
}

impl ResolutionResult {
    /// Successful extraction.
    pub fn success(name: &str, mass: String, source: String) -> Self {
        Self {
            name: name.to_string(),
            mass,
            source,
            error: None,
        }
    }

    /// Name found but the mass field is absent or empty (soft degradation).
    pub fn attribute_missing(name: &str, source: String) -> Self {
        Self {
            name: name.to_string(),
            mass: MASS_NOT_FOUND.to_string(),
            source,
            error: None,
        }
    }

    /// Document reached, name absent from its index (soft-fail).
    pub fn not_found(name: &str, source: String) -> Self {
        Self {
            name: name.to_string(),
            mass: NOT_FOUND.to_string(),
            source,
            error: Some(format!("'{name}' not found")),
        }
    }

    /// Transport failure before or while consulting the document (hard-fail).
    pub fn transport_failure(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            mass: NOT_FOUND.to_string(),
            source: String::new(),
            error: Some(reason.to_string()),
        }
    }

    /// Caller contract violation; no request was attempted.
    pub fn invalid(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            mass: NOT_FOUND.to_string(),
            source: String::new(),
            error: Some(reason.to_string()),
        }
    }

    /// Build the terminal result for a failed request.
    pub fn from_error(name: &str, err: &ResolveError) -> Self {
        match err {
            ResolveError::Validation => Self::invalid(name, &err.to_string()),
            ResolveError::Transport(reason) => Self::transport_failure(name, reason),
            ResolveError::NotFound { source, .. } => Self::not_found(name, source.clone()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn outcome(&self) -> Outcome {
        if self.error.is_none() {
            Outcome::Success
        } else if self.source.is_empty() {
            Outcome::HardFail
        } else {
            Outcome::SoftFail
        }
    }
}
