//! Core type definitions used across the Depot workspace.

pub mod id;
pub mod pagination;
pub mod parent;

pub use id::*;
pub use pagination::{PAGE_SIZE, PageRequest};
pub use parent::{ParentRef, RawParent, ROOT_SENTINEL};
