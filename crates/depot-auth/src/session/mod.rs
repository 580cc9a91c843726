//! Session tokens.

pub mod store;

pub use store::SessionStore;
