pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{BackendConfig, BackendKind, CacheConfig, SourceConfig, StrategyConfig, UmbraConfig};
