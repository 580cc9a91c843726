//! File node domain entities.

pub mod model;

pub use model::{CreateFileNode, FileNode, FileType};
