pub mod adapter;
pub mod commands;
pub mod enumerator;
pub mod error;
pub mod in_memory;
pub mod node;
pub mod output;
pub mod resolver;
pub mod session;

pub use adapter::{AppHandle, AppSession, PlatformAdapter};
pub use enumerator::ApplicationEnumerator;
pub use error::{AdapterError, AppError, ErrorCode};
pub use in_memory::InMemoryAdapter;
pub use node::AppInfo;
pub use output::{ErrorPayload, Response};
pub use resolver::{
    ApplicationResolver, ResolverBuilder, ResolverConfig, ResolverState,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use session::SnapshotSession;
