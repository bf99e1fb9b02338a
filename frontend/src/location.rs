//! Access to the page location.
//!
//! The login screen reads the query string and rewrites the visible URL
//! through [`PageLocation`] instead of a global `window.location`.

use vyzio_types::LOGOUT_QUERY_PARAM;

/// The URL the user currently sees.
pub trait PageLocation {
    /// Full current URL or path.
    fn href(&self) -> String;

    /// Query string including the leading `?`, or empty.
    fn search(&self) -> String;

    /// Replace the visible URL without reloading the page.
    fn replace_url(&mut self, url: &str);

    /// Navigate to a new URL.
    fn assign(&mut self, url: &str);
}

/// Whether the query string marks a return from logout (`logout=true`).
pub fn is_logout_redirect(search: &str) -> bool {
    query_param(search, LOGOUT_QUERY_PARAM).as_deref() == Some("true")
}

/// First value of `name` in a query string, decoded the way browsers decode
/// `application/x-www-form-urlencoded` data.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == name).then(|| decode_component(value))
        })
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}

/// In-memory location for native mode and tests.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    url: String,
    /// URLs passed to [`PageLocation::assign`], oldest first
    navigations: Vec<String>,
}

impl MemoryLocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            navigations: Vec::new(),
        }
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PageLocation for MemoryLocation {
    fn href(&self) -> String {
        self.url.clone()
    }

    fn search(&self) -> String {
        let without_fragment = self.url.split('#').next().unwrap_or_default();
        match without_fragment.find('?') {
            Some(idx) if idx + 1 < without_fragment.len() => without_fragment[idx..].to_string(),
            _ => String::new(),
        }
    }

    fn replace_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    fn assign(&mut self, url: &str) {
        tracing::debug!("Navigating to {}", url);
        self.navigations.push(url.to_string());
        self.url = url.to_string();
    }
}

/// The browser's `window.location`, rewritten through the History API.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

#[cfg(target_arch = "wasm32")]
impl PageLocation for BrowserLocation {
    fn href(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default()
    }

    fn replace_url(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let title = window
            .document()
            .map(|document| document.title())
            .unwrap_or_default();

        match window.history() {
            Ok(history) => {
                if let Err(e) =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, &title, Some(url))
                {
                    tracing::error!("Failed to replace URL: {:?}", e);
                }
            }
            Err(e) => tracing::error!("History API unavailable: {:?}", e),
        }
    }

    fn assign(&mut self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().assign(url) {
                tracing::error!("Failed to navigate to {}: {:?}", url, e);
            }
        }
    }
}
