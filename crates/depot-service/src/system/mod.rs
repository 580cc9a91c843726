//! Health and usage reporting.

pub mod service;

pub use service::{StatsReport, StatusReport, SystemService};
