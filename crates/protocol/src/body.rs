use serde::{Deserialize, Serialize};
use ventokv_common::CommandError;

use crate::{SetCondition, SetOptions};

/// Corpo de `POST /set`.
///
/// Campos ausentes viram vazios e são recusados pelo store, não pelo parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// TTL em segundos, 0 = sem expiração.
    #[serde(default)]
    pub expiry: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl SetRequest {
    /// Converte a condição textual em `SetOptions`.
    pub fn options(&self) -> Result<SetOptions, CommandError> {
        let condition = match self.condition.as_deref() {
            Some(c) => SetCondition::parse(c)?,
            None => None,
        };
        Ok(SetOptions::new(self.expiry, condition))
    }
}

/// Corpo de `POST /qpush`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QPushRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Corpo de `POST /command`, ex.: `{"command": "SET k v EX 10 NX"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Query de `GET /get?key=...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetQuery {
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthResponse {
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub keys: usize,
}
