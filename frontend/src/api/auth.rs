use serde_json::Value;
use vyzio_types::{LoginRequest, LoginResponse, LOGIN_PATH, LOGOUT_PATH};

use super::*;

/// A single login submission: the credentials as they were when the user
/// submitted, plus the CSRF token read at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub request: LoginRequest,
    /// Empty when no CSRF cookie was present
    pub csrf_token: String,
}

impl ApiClient {
    /// Login with username and password.
    ///
    /// Issues exactly one request. A body that is not JSON is a
    /// [`ApiError::Decode`] whatever the status; a JSON body with a non-2xx
    /// status is [`ApiError::Rejected`].
    pub async fn login(&self, attempt: &LoginAttempt) -> ApiResult<LoginResponse> {
        use tracing::info;

        info!("Attempting login for user: {}", attempt.request.username);

        let response = self
            .post_with_csrf(LOGIN_PATH, &attempt.csrf_token)
            .json(&attempt.request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network request failed: {}", e);
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        info!("Login response status: {}", status);

        let body: Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse login response: {}", e);
            ApiError::Decode(e.to_string())
        })?;
        let login_response = decode_login_body(status.is_success(), body)?;

        if !status.is_success() {
            let message = login_response.error_message();
            tracing::warn!(
                "Login rejected with HTTP {}: {}",
                status.as_u16(),
                message.as_deref().unwrap_or("no message")
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!("Login accepted for user: {}", attempt.request.username);
        Ok(login_response)
    }

    /// Logout the current session.
    pub async fn logout(&self, csrf_token: &str) -> ApiResult<()> {
        use tracing::info;

        info!("Logging out");

        let response = self
            .post_with_csrf(LOGOUT_PATH, csrf_token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<LoginResponse>()
                .await
                .ok()
                .and_then(|body| body.error_message());
            tracing::error!("Logout failed with HTTP {}", status);
            return Err(ApiError::Rejected { status, message });
        }

        info!("Logged out successfully");
        Ok(())
    }
}

/// Interpret a JSON login body. A `null` body is an empty success on 2xx
/// and unreadable otherwise. Any other non-object value carries no error.
fn decode_login_body(success: bool, body: Value) -> ApiResult<LoginResponse> {
    match body {
        Value::Null if success => Ok(LoginResponse::default()),
        Value::Null => Err(ApiError::Decode("login response body is null".to_string())),
        Value::Object(_) => Ok(serde_json::from_value(body).unwrap_or_default()),
        _ => Ok(LoginResponse::default()),
    }
}
