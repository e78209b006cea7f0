//! Vocabulary lifecycle: bulk import, store load, administrative adds, and
//! explicit engine rebuilds.
//!
//! The in-memory [`VocabularyCache`] is the snapshot source for automaton
//! builds. It is append-only and deduplicated; the sequence existing at the
//! moment of a rebuild is the only one reflected in the published engine.
//! Adding a word does **not** rebuild; operators trigger
//! [`VocabularyService::rebuild`] as a separate step, and until then scans
//! keep using the previously published engine.

mod import;
mod store;

pub use import::{parse_word_table, read_word_table, ImportError};
pub use store::{LookupMirror, MemoryWordStore, StoreError, WordStore};

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use crate::automaton::AutomatonBuilder;
use crate::filter::{EngineHandle, EvasionError, FilterEngine, SplitEvasionDetector};

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Evasion(#[from] EvasionError),

    #[error("a sensitive word must not be empty")]
    EmptyWord,
}

#[derive(Default)]
struct CacheInner {
    words: Vec<String>,
    seen: HashSet<String>,
}

/// Ordered, append-only, deduplicated word list. Appends are synchronized;
/// snapshots are cheap clones taken under the read lock.
#[derive(Default)]
pub struct VocabularyCache {
    inner: RwLock<CacheInner>,
}

impl VocabularyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `word` unless already present. Returns true if appended.
    pub fn append(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut inner = self.inner.write();
        if inner.seen.contains(word) {
            return false;
        }
        inner.seen.insert(word.to_string());
        inner.words.push(word.to_string());
        true
    }

    /// The current word sequence, in append order.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.read().words.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().words.is_empty()
    }
}

/// Orchestrates the vocabulary lifecycle against the store, the optional
/// lookup mirror, the cache, and the shared engine handle.
pub struct VocabularyService {
    store: Arc<dyn WordStore>,
    mirror: Option<Arc<dyn LookupMirror>>,
    cache: VocabularyCache,
    engine: EngineHandle,
}

impl VocabularyService {
    pub fn new(
        store: Arc<dyn WordStore>,
        mirror: Option<Arc<dyn LookupMirror>>,
        engine: EngineHandle,
    ) -> Self {
        Self {
            store,
            mirror,
            cache: VocabularyCache::new(),
            engine,
        }
    }

    /// Bulk import: clear the store, then persist every word from the
    /// table at `path`. Returns the number of table words processed.
    /// Does not touch the cache; callers follow up with
    /// [`Self::load_from_store`].
    pub async fn import_table(&self, path: &Path) -> Result<usize, VocabularyError> {
        let words = read_word_table(path)?;
        self.store.clear_all().await?;
        for word in &words {
            self.store.insert_if_absent(word).await?;
        }
        info!(count = words.len(), path = %path.display(), "imported word table");
        Ok(words.len())
    }

    /// Load every persisted word into the cache (and the lookup mirror,
    /// when configured). Returns the cache size afterwards.
    pub async fn load_from_store(&self) -> Result<usize, VocabularyError> {
        let words = self.store.load_all().await?;
        for word in &words {
            if self.cache.append(word) {
                if let Some(mirror) = &self.mirror {
                    mirror.add_to_set(word).await?;
                }
            }
        }
        info!(count = self.cache.len(), "vocabulary cache loaded from store");
        Ok(self.cache.len())
    }

    /// Administrative add: persist first, then mirror, then cache. A store
    /// or mirror failure leaves the cache untouched, so cache and store
    /// never diverge. Returns true if the word was new to the cache.
    ///
    /// Does not rebuild the engine; the word only becomes effective in
    /// scans after the next explicit [`Self::rebuild`].
    pub async fn add_word(&self, word: &str) -> Result<bool, VocabularyError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(VocabularyError::EmptyWord);
        }
        self.store.insert_if_absent(word).await?;
        if let Some(mirror) = &self.mirror {
            mirror.add_to_set(word).await?;
        }
        Ok(self.cache.append(word))
    }

    /// Build a fresh engine from the current cache snapshot and publish it
    /// atomically. In-flight scans finish against whichever engine they
    /// loaded; new scans pick up the replacement. Returns the snapshot size.
    pub fn rebuild(&self) -> Result<usize, VocabularyError> {
        let snapshot = self.cache.snapshot();

        let mut builder = AutomatonBuilder::new();
        for word in &snapshot {
            builder.insert(word);
        }
        let automaton = builder.build();
        let evasion = SplitEvasionDetector::compile(&snapshot)?;

        self.engine
            .store(Some(Arc::new(FilterEngine { automaton, evasion })));
        info!(words = snapshot.len(), "filter engine rebuilt and published");
        Ok(snapshot.len())
    }

    /// Words currently cached (snapshot source for the next rebuild).
    pub fn cached_words(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::engine_handle;
    use async_trait::async_trait;

    /// Store whose writes always fail, for divergence tests.
    struct BrokenStore;

    #[async_trait]
    impl WordStore for BrokenStore {
        async fn load_all(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn insert_if_absent(&self, _word: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn clear_all(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    /// Mirror recording every word it was handed.
    #[derive(Default)]
    struct RecordingMirror {
        words: parking_lot::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LookupMirror for RecordingMirror {
        async fn add_to_set(&self, word: &str) -> Result<(), StoreError> {
            self.words.lock().push(word.to_string());
            Ok(())
        }
    }

    fn service(store: Arc<dyn WordStore>) -> VocabularyService {
        VocabularyService::new(store, None, engine_handle())
    }

    #[test]
    fn test_cache_append_deduplicates() {
        let cache = VocabularyCache::new();
        assert!(cache.append("bad"));
        assert!(!cache.append("bad"));
        assert!(!cache.append(""));
        assert_eq!(cache.snapshot(), vec!["bad"]);
    }

    #[tokio::test]
    async fn test_add_word_persists_then_caches() {
        let svc = service(Arc::new(MemoryWordStore::new()));
        assert!(svc.add_word("bad").await.unwrap());
        assert!(!svc.add_word("bad").await.unwrap());
        assert_eq!(svc.cached_words(), 1);
    }

    #[tokio::test]
    async fn test_add_word_rejects_empty_input() {
        let svc = service(Arc::new(MemoryWordStore::new()));
        assert!(matches!(
            svc.add_word("   ").await,
            Err(VocabularyError::EmptyWord)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let svc = service(Arc::new(BrokenStore));
        assert!(svc.add_word("bad").await.is_err());
        assert_eq!(svc.cached_words(), 0);
    }

    #[tokio::test]
    async fn test_load_from_store_populates_cache_and_mirror() {
        let store = Arc::new(MemoryWordStore::new());
        store.insert_if_absent("bad").await.unwrap();
        store.insert_if_absent("worse").await.unwrap();

        let mirror = Arc::new(RecordingMirror::default());
        let svc = VocabularyService::new(store, Some(mirror.clone()), engine_handle());

        assert_eq!(svc.load_from_store().await.unwrap(), 2);
        assert_eq!(*mirror.words.lock(), vec!["bad", "worse"]);
    }

    #[tokio::test]
    async fn test_load_from_store_is_idempotent() {
        let store = Arc::new(MemoryWordStore::new());
        store.insert_if_absent("bad").await.unwrap();
        let svc = service(store);
        svc.load_from_store().await.unwrap();
        svc.load_from_store().await.unwrap();
        assert_eq!(svc.cached_words(), 1);
    }

    #[tokio::test]
    async fn test_rebuild_publishes_engine_from_snapshot() {
        let handle = engine_handle();
        let svc = VocabularyService::new(Arc::new(MemoryWordStore::new()), None, handle.clone());
        svc.add_word("bad").await.unwrap();

        assert!(handle.load().is_none());
        assert_eq!(svc.rebuild().unwrap(), 1);

        let engine = handle.load();
        let engine = engine.as_deref().unwrap();
        assert_eq!(engine.automaton.scan("bad").count("bad"), 1);
        assert_eq!(engine.evasion.pattern_count(), 1);
    }
}
