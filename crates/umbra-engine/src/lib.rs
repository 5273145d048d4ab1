//! Resolution engine: turns a free-text object name into a mass reading from
//! a remote, weakly-structured document.
//!
//! The engine is backend-agnostic. A [`backend::DocumentBackend`] supplies the
//! document (plain HTTP fetch or headless render), a
//! [`index::DocumentIndex`] strategy turns it into a name → position index and
//! reads the mass field at a position, and [`resolver::Resolver`] runs the
//! per-request state machine on top of both.

pub mod backend;
pub mod cache;
pub mod config;
pub mod index;
pub mod resolver;

pub use backend::{DocumentBackend, DocumentRow, NavigationResult, RowSelector, TextBlock};
pub use cache::ResultCache;
pub use index::{Confidence, DocumentIndex, NameIndex};
pub use resolver::{Resolver, ResolverOptions};
pub use umbra_common::{BackendError, Outcome, ResolveError, ResolutionResult};
