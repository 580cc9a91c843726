//! Image derivative generation.

pub mod generator;
