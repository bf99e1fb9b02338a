//! Vyzio frontend library.
//!
//! The login screen and the pieces it depends on: the authentication API
//! client, cookie and page-location access, and the application shell that
//! hosts them on WASM and native.

#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
pub mod app;
pub mod cookies;
pub mod location;
pub mod login;
pub mod messages;
pub mod state;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

pub use app::{AppSettings, VyzioApp};
pub use login::LoginScreen;
