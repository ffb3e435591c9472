//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

/// Form/query payload carrying a single number.
#[derive(Debug, Clone, Deserialize)]
pub struct NumberParam {
    /// The number to act on.
    #[serde(default)]
    pub number: String,
}

/// JSON body for replacing the whole registry.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceNumbersRequest {
    /// New registry contents, duplicates allowed.
    pub numbers: Vec<String>,
}

/// Administrator login form.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// Submitted username.
    #[serde(default)]
    pub username: String,
    /// Submitted password.
    #[serde(default)]
    pub password: String,
}

/// Mobile handshake response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    /// Service name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// Mobile response for membership checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the number is registered.
    pub exists: bool,
}

/// Mobile response for mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`; failures are reported through the error envelope.
    pub success: bool,
}

impl SuccessResponse {
    /// A successful outcome.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
