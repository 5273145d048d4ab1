pub mod backend;
pub mod cdp;
pub mod pool;

pub use backend::HeadlessBackend;
pub use pool::RendererPool;
