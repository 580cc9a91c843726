//! # depot-service
//!
//! Business logic for Depot. Services compose the repositories, the
//! session store, byte storage, and the derivative scheduler into the
//! operations exposed over HTTP.

pub mod auth;
pub mod context;
pub mod file;
pub mod system;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use file::{CreateFileRequest, FileContent, FileService};
pub use system::{StatsReport, StatusReport, SystemService};
pub use user::UserService;

#[cfg(test)]
pub(crate) mod test_support;
