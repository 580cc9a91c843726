//! # depot-entity
//!
//! Domain entity models for Depot: users, file nodes, and derivative
//! generation jobs. These types are storage-agnostic; the database crate
//! maps its rows into them.

pub mod file;
pub mod job;
pub mod user;
