//! Stub authentication server for integration tests.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use vyzio_types::{CSRF_HEADER, LOGIN_PATH, LOGOUT_PATH};

/// A request as the stub server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub csrf_token: Option<String>,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
    /// Parsed JSON body, `Value::Null` when empty or not JSON
    pub body: Value,
}

/// What the stub answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    Json {
        status: StatusCode,
        body: Value,
        set_cookie: Option<&'static str>,
    },
    Text {
        status: StatusCode,
        body: &'static str,
    },
}

impl StubReply {
    pub fn json(status: u16, body: Value) -> Self {
        StubReply::Json {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            set_cookie: None,
        }
    }

    pub fn text(status: u16, body: &'static str) -> Self {
        StubReply::Text {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    pub fn with_cookie(self, cookie: &'static str) -> Self {
        match self {
            StubReply::Json { status, body, .. } => StubReply::Json {
                status,
                body,
                set_cookie: Some(cookie),
            },
            other => other,
        }
    }
}

impl IntoResponse for StubReply {
    fn into_response(self) -> Response {
        match self {
            StubReply::Json {
                status,
                body,
                set_cookie,
            } => {
                let mut response = (status, Json(body)).into_response();
                if let Some(cookie) = set_cookie {
                    response
                        .headers_mut()
                        .insert(header::SET_COOKIE, HeaderValue::from_static(cookie));
                }
                response
            }
            StubReply::Text { status, body } => {
                (status, [(header::CONTENT_TYPE, "text/html")], body).into_response()
            }
        }
    }
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    login_reply: Arc<Mutex<StubReply>>,
    logout_reply: Arc<Mutex<StubReply>>,
}

impl StubState {
    fn record(&self, path: &'static str, headers: &HeaderMap, body: &Bytes) {
        let header_text = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        self.requests.lock().unwrap().push(RecordedRequest {
            path,
            csrf_token: header_text(CSRF_HEADER),
            content_type: header_text(header::CONTENT_TYPE.as_str()),
            cookie: header_text(header::COOKIE.as_str()),
            body: serde_json::from_slice(body).unwrap_or(Value::Null),
        });
    }
}

async fn login(State(state): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    state.record(LOGIN_PATH, &headers, &body);
    let reply = state.login_reply.lock().unwrap().clone();
    reply.into_response()
}

async fn logout(State(state): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    state.record(LOGOUT_PATH, &headers, &body);
    let reply = state.logout_reply.lock().unwrap().clone();
    reply.into_response()
}

/// Running stub server.
pub struct StubServer {
    pub url: String,
    state: StubState,
}

impl StubServer {
    /// Start a server on an ephemeral port answering logins with `login_reply`.
    pub async fn start(login_reply: StubReply) -> Self {
        let state = StubState {
            requests: Arc::default(),
            login_reply: Arc::new(Mutex::new(login_reply)),
            logout_reply: Arc::new(Mutex::new(StubReply::json(200, json!({})))),
        };

        let app = Router::new()
            .route(LOGIN_PATH, post(login))
            .route(LOGOUT_PATH, post(logout))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_logout_reply(&self, reply: StubReply) {
        *self.state.logout_reply.lock().unwrap() = reply;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

/// URL of a port nothing is listening on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
