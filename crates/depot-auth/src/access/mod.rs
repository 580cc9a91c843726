//! Token-to-identity resolution and node visibility.

pub mod controller;
pub mod policy;

pub use controller::AccessController;
pub use policy::can_read;
