//! Collaborator seams for vocabulary persistence.
//!
//! The engine does not own vocabulary storage. A [`WordStore`] is whatever
//! durable backend the deployment provides (SQL, KV, flat file); a
//! [`LookupMirror`] is an optional fast-lookup set other subsystems read
//! (the engine only ever writes to it). [`MemoryWordStore`] backs tests and
//! the CLI.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use thiserror::Error;

/// Errors surfaced by store and mirror backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Durable word-list backend.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All persisted words, in insertion order.
    async fn load_all(&self) -> Result<Vec<String>, StoreError>;

    /// Persist `word` unless already present. Returns true if inserted.
    async fn insert_if_absent(&self, word: &str) -> Result<bool, StoreError>;

    /// Remove every persisted word (used before a bulk reload).
    async fn clear_all(&self) -> Result<(), StoreError>;
}

/// Fast-lookup mirror consumed by other subsystems; write-only here.
#[async_trait]
pub trait LookupMirror: Send + Sync {
    async fn add_to_set(&self, word: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    words: Vec<String>,
    seen: HashSet<String>,
}

/// In-memory [`WordStore`] for tests and the CLI. Not durable.
#[derive(Default)]
pub struct MemoryWordStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn load_all(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.inner.lock().words.clone())
    }

    async fn insert_if_absent(&self, word: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock();
        if inner.seen.contains(word) {
            return Ok(false);
        }
        inner.seen.insert(word.to_string());
        inner.words.push(word.to_string());
        Ok(true)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.words.clear();
        inner.seen.clear();
        Ok(())
    }
}
