use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use ventokv_protocol::{
    Command, CommandRequest, GetQuery, HealthResponse, LengthResponse, QPushRequest, SetRequest,
    StatusResponse, ValueResponse,
};
use ventokv_storage::Store;

use crate::ApiError;

/// `POST /set`
pub async fn set_key(
    State(store): State<Store>,
    body: Result<Json<SetRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = body?;
    let options = req.options()?;
    store.set(&req.key, req.value, &options)?;
    Ok(StatusCode::CREATED)
}

/// `GET /get?key=...`
pub async fn get_key(
    State(store): State<Store>,
    query: Result<Query<GetQuery>, QueryRejection>,
) -> Result<Json<ValueResponse>, ApiError> {
    let Query(query) = query?;
    if query.key.is_empty() {
        return Err(ApiError::BadRequest("key é obrigatória".into()));
    }
    let value = store.get(&query.key)?;
    Ok(Json(ValueResponse { value }))
}

/// `POST /qpush`
pub async fn queue_push(
    State(store): State<Store>,
    body: Result<Json<QPushRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LengthResponse>), ApiError> {
    let Json(req) = body?;
    let length = store.qpush(&req.key, &req.values)?;
    Ok((StatusCode::CREATED, Json(LengthResponse { length })))
}

/// `POST /command` com uma linha no formato `SET key value EX 10 NX`.
pub async fn run_command(
    State(store): State<Store>,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    let cmd = Command::from_line(&req.command)?;
    debug!("comando {} recebido: {cmd:?}", cmd.name());
    execute_command(cmd, &store)
}

/// `GET /health`
pub async fn health(State(store): State<Store>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        keys: store.len(),
    })
}

/// Executa um comando e monta a resposta HTTP.
pub fn execute_command(cmd: Command, store: &Store) -> Result<Response, ApiError> {
    let response = match cmd {
        Command::Get(key) => {
            let value = store.get(&key)?;
            (StatusCode::OK, Json(ValueResponse { value })).into_response()
        }
        Command::Set {
            key,
            value,
            options,
        } => {
            store.set(&key, value, &options)?;
            (StatusCode::CREATED, Json(StatusResponse::ok())).into_response()
        }
        Command::QPush { key, values } => {
            let length = store.qpush(&key, &values)?;
            (StatusCode::CREATED, Json(LengthResponse { length })).into_response()
        }
    };
    Ok(response)
}
