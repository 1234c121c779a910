use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::models::Mapping;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("no mapping configured for host '{0}'")]
    NotFound(String),
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Process-wide table of host redirect mappings.
///
/// Lookups take a shared lock and never observe a half-written entry; writers
/// replace or append whole `Mapping` values under the exclusive lock.
/// Hostnames are matched exactly, without case folding.
#[derive(Debug, Default)]
pub struct MappingStore {
    entries: RwLock<Vec<Mapping>>,
}

impl MappingStore {
    /// Build a store seeded with `initial`. Later duplicates win.
    pub fn new(initial: impl IntoIterator<Item = Mapping>) -> Self {
        let store = Self::default();
        for mapping in initial {
            store.upsert(mapping);
        }
        store
    }

    /// Insert `mapping`, replacing the destination of an existing hostname.
    pub fn upsert(&self, mapping: Mapping) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|m| m.hostname == mapping.hostname) {
            Some(existing) => existing.destination = mapping.destination,
            None => entries.push(mapping),
        }
    }

    /// Destination configured for `hostname`.
    pub fn lookup(&self, hostname: &str) -> MappingResult<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|m| m.hostname == hostname)
            .map(|m| m.destination.clone())
            .ok_or_else(|| MappingError::NotFound(hostname.to_string()))
    }

    /// Snapshot of every mapping, in insertion order.
    pub fn list(&self) -> Vec<Mapping> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn remove(&self, hostname: &str) -> MappingResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let position = entries
            .iter()
            .position(|m| m.hostname == hostname)
            .ok_or_else(|| MappingError::NotFound(hostname.to_string()))?;
        entries.remove(position);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
