//! Codificação de filas como string.
//!
//! Uma fila é exposta pelo GET como um array JSON de strings, o que permite
//! devolvê-la como qualquer outro valor. Quem lê decodifica com [`decode`].

use ventokv_common::StorageError;

pub fn encode(items: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(|e| StorageError::Encoding(e.to_string()))
}

/// Decodifica um valor devolvido pelo GET de uma fila.
pub fn decode(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Encoding(e.to_string()))
}
