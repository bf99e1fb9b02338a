//! Shared types for the Vyzio login client.
//!
//! This crate contains the wire types and endpoint constants used when
//! talking to the Vyzio authentication service.

/// Default server URL used by native builds when nothing is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Login endpoint path.
pub const LOGIN_PATH: &str = "/api/auth/login/";

/// Logout endpoint path.
pub const LOGOUT_PATH: &str = "/api/auth/logout/";

/// Name of the cookie carrying the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the CSRF token is echoed back in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Query parameter set on the landing URL after a logout redirect.
pub const LOGOUT_QUERY_PARAM: &str = "logout";

pub mod api;

pub use api::{LoginRequest, LoginResponse};
