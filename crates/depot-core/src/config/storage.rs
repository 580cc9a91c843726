//! Byte storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded bytes and their derivatives.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Widths, in pixels, of the derivatives produced for each image.
    #[serde(default = "default_derivative_widths")]
    pub derivative_widths: Vec<u32>,
    /// Upper bound on a single read, write, or delete, in milliseconds.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            derivative_widths: default_derivative_widths(),
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }
}

fn default_root_path() -> String {
    std::env::temp_dir()
        .join("files_manager")
        .to_string_lossy()
        .into_owned()
}

fn default_derivative_widths() -> Vec<u32> {
    vec![500, 250, 100]
}

fn default_operation_timeout_ms() -> u64 {
    10_000
}
