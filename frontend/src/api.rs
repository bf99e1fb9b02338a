//! API client for communicating with the Vyzio authentication service.

mod auth;

pub use auth::LoginAttempt;

use vyzio_types::CSRF_HEADER;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived
    #[error("Network error: {0}")]
    Network(String),
    /// The response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),
    /// The server answered with a non-2xx status
    #[error("HTTP {status} error: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        /// Server-provided error text, if any
        message: Option<String>,
    },
}

impl ApiError {
    /// Whether the failure happened below the application level.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }
}

/// Client for the Vyzio REST API.
#[derive(Clone)]
pub struct ApiClient {
    server_url: String,
    client: reqwest::Client,
    /// Cookies received from the server (the browser keeps these on WASM)
    /// Absent when the client had to be built without one
    #[cfg(not(target_arch = "wasm32"))]
    cookie_jar: Option<std::sync::Arc<reqwest::cookie::Jar>>,
}

impl ApiClient {
    /// Create a new API client for the given server URL.
    #[cfg(target_arch = "wasm32")]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: normalize_server_url(server_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new API client for the given server URL.
    ///
    /// Falls back to a client without cookie storage if the cookie-enabled
    /// one cannot be built.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self::try_new(server_url.clone()).unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with cookie jar: {}", e);
            Self::without_cookie_jar(server_url)
        })
    }

    /// Create a new API client with a cookie jar shared across requests.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn try_new(server_url: impl Into<String>) -> ApiResult<Self> {
        let cookie_jar = std::sync::Arc::new(reqwest::cookie::Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            server_url: normalize_server_url(server_url.into()),
            client,
            cookie_jar: Some(cookie_jar),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn without_cookie_jar(server_url: String) -> Self {
        Self {
            server_url: normalize_server_url(server_url),
            client: reqwest::Client::new(),
            cookie_jar: None,
        }
    }

    /// Get the server URL the client talks to.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Cookies the server has set on this client. Empty when the client
    /// has no cookie jar.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn cookie_source(&self) -> Box<dyn crate::cookies::CookieSource> {
        use crate::cookies::{JarCookies, StaticCookies};

        match self.cookie_jar {
            Some(ref jar) => Box::new(JarCookies::new(jar.clone(), self.server_url.clone())),
            None => Box::new(StaticCookies::default()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// POST builder carrying the CSRF header and, in the browser, cookies.
    fn post_with_csrf(&self, path: &str, csrf_token: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(self.endpoint(path))
            .header(CSRF_HEADER, csrf_token);

        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();

        builder
    }
}

fn normalize_server_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
