//! Authentication wire types for `/login` and `/register`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Successful login/register response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Error body returned by the backend on failure.
///
/// `detail` is a plain message for handled errors ("Incorrect password") and
/// an array of field errors for request validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// The message to show verbatim, if the backend sent a plain one
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_str()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
