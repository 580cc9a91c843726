//! Session lifetime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a session token in seconds, fixed at creation.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

impl SessionConfig {
    /// Session lifetime as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    86_400
}
