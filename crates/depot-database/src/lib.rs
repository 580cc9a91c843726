//! # depot-database
//!
//! SQLite connection management and concrete repositories for users, file
//! nodes, and the derivative job queue.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, JobRepository, UserRepository};
