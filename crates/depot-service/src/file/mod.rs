//! File node creation, listing, visibility, and content access.

pub mod service;

pub use service::{CreateFileRequest, FileContent, FileService};
