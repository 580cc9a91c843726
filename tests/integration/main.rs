//! End-to-end tests driving the HTTP router against SQLite and local
//! storage in temporary directories.

mod auth_test;
mod file_test;
mod helpers;
mod pipeline_test;
