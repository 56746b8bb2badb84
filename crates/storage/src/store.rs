use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use tokio::time::{Duration, Instant};
use tracing::debug;

use ventokv_common::StorageError;
use ventokv_protocol::{SetCondition, SetOptions};

use crate::entry::{Entry, Value};

/// Estado compartilhado entre todos os handles.
#[derive(Default)]
struct SharedState {
    data: DashMap<String, Entry>,
}

/// Handle para o store in-memory.
///
/// Clonar é barato: os clones compartilham o mesmo mapa. Cada chamada a
/// [`Store::new`] cria um store independente. Operações na mesma chave são
/// serializadas pelo lock do shard do `DashMap`; chaves em shards diferentes
/// não se bloqueiam.
///
/// A expiração é preguiçosa: quem encontra uma entrada vencida a remove antes
/// de continuar. [`Store::purge_expired`] varre o mapa inteiro sob demanda.
#[derive(Clone, Default)]
pub struct Store {
    shared: Arc<SharedState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Result<String, StorageError> {
        let entry = self.shared.data.get(key).ok_or(StorageError::NotFound)?;
        if entry.is_expired() {
            drop(entry);
            self.evict_if_expired(key);
            return Err(StorageError::NotFound);
        }
        entry.value.render()
    }

    /// Grava `value` em `key`, substituindo valor, TTL e tipo anteriores.
    ///
    /// `ttl_secs == 0` grava sem expiração. Uma entrada já vencida conta como
    /// ausente para NX/XX.
    pub fn set(&self, key: &str, value: String, options: &SetOptions) -> Result<(), StorageError> {
        if key.is_empty() || value.is_empty() {
            return Err(StorageError::InvalidArgument(
                "key e value são obrigatórios".into(),
            ));
        }
        if options.ttl_secs < 0 {
            return Err(StorageError::InvalidArgument(format!(
                "expiração inválida: {}",
                options.ttl_secs
            )));
        }

        // TTL além do que o relógio representa grava sem expiração
        let expires_at = if options.ttl_secs > 0 {
            Instant::now().checked_add(Duration::from_secs(options.ttl_secs as u64))
        } else {
            None
        };
        let entry = Entry::new(Value::Scalar(value), expires_at);

        match self.shared.data.entry(key.to_owned()) {
            MapEntry::Occupied(mut slot) => {
                let expired = slot.get().is_expired();
                match options.condition {
                    Some(SetCondition::Nx) if !expired => {
                        debug!("SET NX recusado, chave existe: {key}");
                        return Err(StorageError::AlreadyExists);
                    }
                    Some(SetCondition::Xx) if expired => {
                        slot.remove();
                        debug!("key expirada removida: {key}");
                        return Err(StorageError::DoesNotExist);
                    }
                    _ => {
                        slot.insert(entry);
                    }
                }
            }
            MapEntry::Vacant(slot) => {
                if options.condition == Some(SetCondition::Xx) {
                    debug!("SET XX recusado, chave ausente: {key}");
                    return Err(StorageError::DoesNotExist);
                }
                slot.insert(entry);
            }
        }

        Ok(())
    }

    /// Anexa `values` ao fim da fila em `key` e devolve o novo tamanho.
    ///
    /// Chave ausente (ou vencida) começa uma fila vazia sem TTL. Uma chave com
    /// valor escalar devolve `WrongType` e fica intacta.
    pub fn qpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        if key.is_empty() || values.is_empty() {
            return Err(StorageError::InvalidArgument(
                "key e values são obrigatórios".into(),
            ));
        }
        if values.iter().any(|v| v.is_empty()) {
            return Err(StorageError::InvalidArgument(
                "values não pode conter itens vazios".into(),
            ));
        }

        // Entry API do DashMap segura o lock do shard durante todo o push
        let mut entry = self
            .shared
            .data
            .entry(key.to_owned())
            .or_insert_with(Entry::empty_queue);

        if entry.is_expired() {
            debug!("key expirada substituída por fila: {key}");
            *entry = Entry::empty_queue();
        }

        match &mut entry.value {
            Value::Queue(queue) => {
                queue.extend(values.iter().cloned());
                Ok(queue.len())
            }
            Value::Scalar(_) => Err(StorageError::WrongType),
        }
    }

    /// Presença da chave após a checagem de expiração.
    pub fn exists(&self, key: &str) -> bool {
        let Some(entry) = self.shared.data.get(key) else {
            return false;
        };
        if entry.is_expired() {
            drop(entry);
            self.evict_if_expired(key);
            return false;
        }
        true
    }

    /// Número de entradas no mapa, incluindo vencidas ainda não removidas.
    pub fn len(&self) -> usize {
        self.shared.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.data.is_empty()
    }

    /// Remove todas as entradas vencidas. Retorna quantas foram removidas.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.shared.data.retain(|key, entry| {
            if entry.is_expired_at(now) {
                debug!("key expirada removida: {key}");
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    // Só remove se ainda estiver vencida (pode ter sido re-setada entre o
    // drop do read lock e o remove).
    fn evict_if_expired(&self, key: &str) -> bool {
        let removed = self
            .shared
            .data
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some();
        if removed {
            debug!("key expirada removida: {key}");
        }
        removed
    }
}
