//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /connect` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Session token to send back as `X-Token`.
    pub token: String,
}
