use tokio::time::Instant;
use ventokv_common::StorageError;

use crate::queue;

/// Tipo do valor armazenado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Queue(Vec<String>),
}

impl Value {
    /// Representação textual devolvida pelo GET. Filas viram um array JSON.
    pub fn render(&self) -> Result<String, StorageError> {
        match self {
            Value::Scalar(s) => Ok(s.clone()),
            Value::Queue(items) => queue::encode(items),
        }
    }
}

/// Entrada no store: valor + TTL opcional.
#[derive(Debug, Clone)]
pub struct Entry {
    pub value: Value,
    pub expires_at: Option<Instant>,
}

impl Entry {
    pub fn new(value: Value, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    pub fn empty_queue() -> Self {
        Self::new(Value::Queue(Vec::new()), None)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|t| now >= t).unwrap_or(false)
    }
}
