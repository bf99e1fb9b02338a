//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Authentication API Types
// ============================================================================

/// Login request payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decoded JSON body of a login response, successful or not.
///
/// The service only guarantees an optional `error` field on failure, so
/// everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl LoginResponse {
    /// The server-provided error text.
    ///
    /// Non-empty strings are used as-is. Non-zero numbers and `true` are
    /// shown in their JSON form. Empty, zero, `false`, `null` and
    /// structured values count as absent.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(message) if !message.is_empty() => Some(message.clone()),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}
