use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use ventokv_common::{CommandError, StorageError};
use ventokv_protocol::ErrorResponse;

/// Falha de uma requisição, já com o status HTTP decidido.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("requisição inválida: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Storage(e) if e.is_encoding() => StatusCode::INTERNAL_SERVER_ERROR,
            // NX recusado é conflito; XX recusado é chave ausente
            ApiError::Storage(e) if e.is_condition_failed() => match e {
                StorageError::AlreadyExists => StatusCode::CONFLICT,
                _ => StatusCode::NOT_FOUND,
            },
            ApiError::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::BAD_REQUEST,
            ApiError::Command(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("erro interno: {self}");
        } else {
            debug!("requisição recusada ({status}): {self}");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
