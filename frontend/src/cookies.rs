//! Cookie lookup used to obtain the CSRF token.
//!
//! The login screen never touches a global cookie store directly. It asks a
//! [`CookieSource`], which is the browser's `document.cookie` on WASM and the
//! HTTP client's cookie jar in native mode.

/// Read-only access to cookies by name.
pub trait CookieSource {
    /// Get the decoded value of the first cookie called `name`.
    fn get(&self, name: &str) -> Option<String>;
}

/// Find a cookie in a `Cookie`-style header (`a=1; b=2`).
///
/// Pairs are trimmed before matching, the first pair with an exact key
/// match wins and its value is percent-decoded. Pairs without `=` are skipped.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| decode_value(value))
    })
}

fn decode_value(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Cookies from a fixed header string.
#[derive(Debug, Clone, Default)]
pub struct StaticCookies {
    header: String,
}

impl StaticCookies {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl CookieSource for StaticCookies {
    fn get(&self, name: &str) -> Option<String> {
        parse_cookie(&self.header, name)
    }
}

/// Cookies from the page's `document.cookie`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

#[cfg(target_arch = "wasm32")]
impl CookieSource for DocumentCookies {
    fn get(&self, name: &str) -> Option<String> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let header = html_document.cookie().ok()?;
        parse_cookie(&header, name)
    }
}

/// Cookies the HTTP client has stored for the server URL.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JarCookies {
    jar: std::sync::Arc<reqwest::cookie::Jar>,
    server_url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl JarCookies {
    pub fn new(jar: std::sync::Arc<reqwest::cookie::Jar>, server_url: impl Into<String>) -> Self {
        Self {
            jar,
            server_url: server_url.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CookieSource for JarCookies {
    fn get(&self, name: &str) -> Option<String> {
        use reqwest::cookie::CookieStore;

        let url = reqwest::Url::parse(&self.server_url).ok()?;
        let header = self.jar.cookies(&url)?;
        parse_cookie(header.to_str().ok()?, name)
    }
}
