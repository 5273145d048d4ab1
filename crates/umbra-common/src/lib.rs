pub mod error;
pub mod result;

pub use error::{BackendError, ResolveError};
pub use result::{MASS_NOT_FOUND, NOT_FOUND, Outcome, ResolutionResult};
