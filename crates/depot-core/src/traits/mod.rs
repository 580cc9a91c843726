//! Core traits defined in `depot-core` and implemented by other crates.

pub mod cache;
pub mod scheduler;
pub mod storage;

pub use cache::CacheProvider;
pub use scheduler::DerivativeScheduler;
pub use storage::StorageProvider;
