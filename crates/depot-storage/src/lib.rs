//! # depot-storage
//!
//! Raw byte storage for uploaded content and the image derivative
//! generator that writes resized copies next to each original.

pub mod manager;
pub mod providers;
pub mod thumbnail;

pub use manager::StorageManager;
pub use providers::local::LocalStorageProvider;
pub use thumbnail::generator::{ThumbnailGenerator, derivative_path};
