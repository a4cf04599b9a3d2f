pub mod backend;
pub mod config;
pub mod error;
pub mod file_backend;
pub mod keys;
pub mod record;
pub mod store;

pub use backend::{CacheBackend, MemoryBackend, NullBackend};
pub use config::CacheConfig;
pub use error::CacheError;
pub use file_backend::FileBackend;
pub use keys::{to_alias, to_canonical, Namespace, Tier};
pub use record::CacheRecord;
pub use store::CacheStore;
