use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use ventokv_common::MAX_BODY_SIZE;
use ventokv_storage::Store;

use crate::handler::{get_key, health, queue_push, run_command, set_key};

/// Monta o router HTTP sobre um store.
///
/// - `POST /set`     – `SetRequest`
/// - `GET  /get`     – `?key=...`
/// - `POST /qpush`   – `QPushRequest`
/// - `POST /command` – `{"command": "SET k v EX 10 NX"}`
/// - `GET  /health`
pub fn app(store: Store) -> Router {
    Router::new()
        .route("/set", post(set_key))
        .route("/get", get(get_key))
        .route("/qpush", post(queue_push))
        .route("/command", post(run_command))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(store)
}
