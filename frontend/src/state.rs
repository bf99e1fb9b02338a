//! Channel-based IPC for async operations.

use std::sync::mpsc::{channel, Receiver, Sender};
use vyzio_types::LoginResponse;

use crate::api::ApiResult;

/// Messages sent from async operations to the main UI thread.
#[derive(Debug)]
pub enum AppMessage {
    /// Login request finished, successfully or not
    LoginFinished(ApiResult<LoginResponse>),
    /// The login screen accepted the credentials
    Authenticated,
    /// Logout completed
    LogoutComplete,
    /// Logout request failed
    LogoutFailed(String),
}

/// Application state with channel-based communication.
pub struct AppStateChannels {
    /// Sender for app messages (cloned for each async operation)
    pub tx: Sender<AppMessage>,
    /// Receiver for app messages (owned by main UI thread)
    pub rx: Receiver<AppMessage>,
}

impl AppStateChannels {
    /// Create new application state channels.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Get a clone of the sender for use in async operations.
    pub fn sender(&self) -> Sender<AppMessage> {
        self.tx.clone()
    }
}

impl Default for AppStateChannels {
    fn default() -> Self {
        Self::new()
    }
}
