//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by register, login, and logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    /// Always `"success"`.
    pub result: String,
}

impl ResultResponse {
    /// The success acknowledgement.
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}
