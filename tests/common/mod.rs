//! Shared utilities for integration testing.
//!
//! `start_fake_caddy` runs an in-process stand-in for the Caddy admin API.
//! It holds the configuration as a `serde_json::Value` and answers the
//! endpoints the client uses, re-serializing documents the way a real server
//! would (its own key order, trailing newline).

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Reply = (StatusCode, String);

#[derive(Default)]
pub struct FakeState {
    pub config: Value,
    pub requests: Vec<(Method, String)>,
    pub appended: Vec<String>,
    pub fail_appends: bool,
    pub fail_deletes: bool,
}

#[derive(Clone)]
pub struct FakeCaddy {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeCaddy {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> Value {
        self.state.lock().unwrap().config.clone()
    }

    /// Routes of `server_key`, or an empty list.
    pub fn routes(&self, server_key: &str) -> Vec<Value> {
        self.config()["apps"]["http"]["servers"][server_key]["routes"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    /// Routes of `server_key` carrying `"@id": id`.
    pub fn routes_with_id(&self, server_key: &str, id: &str) -> Vec<Value> {
        self.routes(server_key)
            .into_iter()
            .filter(|r| r["@id"] == id)
            .collect()
    }

    /// Number of requests with `method` whose path starts with `prefix`.
    pub fn count(&self, method: Method, prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(m, p)| *m == method && p.starts_with(prefix))
            .count()
    }

    pub fn appended(&self) -> Vec<String> {
        self.state.lock().unwrap().appended.clone()
    }

    pub fn set_fail_appends(&self, fail: bool) {
        self.state.lock().unwrap().fail_appends = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.state.lock().unwrap().fail_deletes = fail;
    }
}

/// Start a fake admin API on an ephemeral port with a `null` configuration.
pub async fn start_fake_caddy() -> FakeCaddy {
    let state = Arc::new(Mutex::new(FakeState::default()));

    let app = Router::new()
        .route("/load", post(load))
        .route("/config", get(get_config))
        .route("/config/", get(get_config))
        .route("/config/{*path}", get(get_config_path).post(append_config_path))
        .route("/id/{id}", get(get_by_id).delete(delete_by_id))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    FakeCaddy { addr, state }
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

type Shared = Arc<Mutex<FakeState>>;

fn record(state: &mut FakeState, method: Method, uri: &Uri) {
    state.requests.push((method, uri.path().to_string()));
}

fn error_reply(status: StatusCode, message: String) -> Reply {
    (status, format!("{}\n", json!({ "error": message })))
}

fn document(value: &Value) -> Reply {
    (StatusCode::OK, format!("{}\n", value))
}

async fn load(State(state): State<Shared>, method: Method, uri: Uri, body: String) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);

    match serde_json::from_str::<Value>(&body) {
        Ok(config) => {
            state.config = config;
            (StatusCode::OK, String::new())
        }
        Err(e) => error_reply(StatusCode::BAD_REQUEST, format!("loading config: {}", e)),
    }
}

async fn get_config(State(state): State<Shared>, method: Method, uri: Uri) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);
    document(&state.config)
}

async fn get_config_path(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(path): Path<String>,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);

    match lookup(&mut state.config, &path) {
        Some(value) => document(value),
        None => document(&Value::Null),
    }
}

async fn append_config_path(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(path): Path<String>,
    body: String,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);

    if state.fail_appends {
        return error_reply(StatusCode::INTERNAL_SERVER_ERROR, "appending failed".into());
    }
    let item: Value = match serde_json::from_str(&body) {
        Ok(item) => item,
        Err(e) => return error_reply(StatusCode::BAD_REQUEST, format!("decoding request body: {}", e)),
    };

    match lookup(&mut state.config, &path) {
        Some(Value::Array(items)) => items.push(item),
        _ => return error_reply(StatusCode::BAD_REQUEST, format!("invalid traversal path at: config/{}", path)),
    }
    state.appended.push(body);
    (StatusCode::OK, String::new())
}

async fn get_by_id(State(state): State<Shared>, method: Method, uri: Uri, Path(id): Path<String>) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);

    match find_id(&state.config, &id) {
        Some(value) => document(value),
        None => unknown_id(&id),
    }
}

async fn delete_by_id(State(state): State<Shared>, method: Method, uri: Uri, Path(id): Path<String>) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, method, &uri);

    if state.fail_deletes {
        return error_reply(StatusCode::INTERNAL_SERVER_ERROR, "deleting failed".into());
    }
    if remove_id(&mut state.config, &id) {
        (StatusCode::OK, String::new())
    } else {
        unknown_id(&id)
    }
}

fn unknown_id(id: &str) -> Reply {
    error_reply(StatusCode::NOT_FOUND, format!("unknown object ID '{}'", id))
}

fn lookup<'a>(value: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = value;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn find_id<'a>(value: &'a Value, id: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if map.get("@id").and_then(Value::as_str) == Some(id) {
                return Some(value);
            }
            map.values().find_map(|v| find_id(v, id))
        }
        Value::Array(items) => items.iter().find_map(|v| find_id(v, id)),
        _ => None,
    }
}

fn remove_id(value: &mut Value, id: &str) -> bool {
    match value {
        Value::Array(items) => {
            let position = items
                .iter()
                .position(|v| v.get("@id").and_then(Value::as_str) == Some(id));
            match position {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => items.iter_mut().any(|v| remove_id(v, id)),
            }
        }
        Value::Object(map) => map.values_mut().any(|v| remove_id(v, id)),
        _ => false,
    }
}
