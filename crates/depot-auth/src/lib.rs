//! # depot-auth
//!
//! Authentication and access control for Depot:
//!
//! - [`password`]: Argon2id hashing of account passwords
//! - [`session`]: opaque, expiring session tokens kept in the cache
//! - [`access`]: token-to-user resolution and the node read policy

pub mod access;
pub mod password;
pub mod session;

pub use access::{AccessController, can_read};
pub use password::PasswordHasher;
pub use session::SessionStore;
