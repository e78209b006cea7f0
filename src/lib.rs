//! wordguard: deterministic sensitive-word detection and masking.
//!
//! The core is a multi-pattern exact-match automaton (a trie with failure
//! links) built once from a vocabulary snapshot, paired with a
//! split-evasion detector for words typed with filler between their
//! characters. Every outgoing chat message passes through one synchronous
//! [`FilterService::filter_message`] call: scan raw text, merge matches,
//! collapse separators, mask.
//!
//! # Lifecycle
//!
//! 1. Bulk-import the word table into the persistent store.
//! 2. Load all persisted words into the in-memory cache (and the optional
//!    lookup mirror).
//! 3. Build the automaton and evasion patterns from a cache snapshot and
//!    publish them atomically as one immutable engine.
//!
//! Administrative [`FilterService::add_word`] calls append to the store and
//! cache but do **not** republish; scans keep using the live engine until
//! an explicit [`FilterService::rebuild`].

pub mod automaton;
pub mod config;
pub mod filter;
pub mod telemetry;
pub mod vocabulary;

use std::path::Path;
use std::sync::Arc;

use filter::{engine_handle, ContentFilter, EngineHandle};
use vocabulary::{LookupMirror, VocabularyError, VocabularyService, WordStore};

/// The assembled filter service: vocabulary lifecycle on one side, the
/// per-message filtering entry point on the other, sharing one atomically
/// swappable engine handle.
pub struct FilterService {
    vocabulary: VocabularyService,
    filter: ContentFilter,
    engine: EngineHandle,
}

impl FilterService {
    /// Wire a service against the given store and optional lookup mirror.
    /// No engine is published yet; call [`Self::bootstrap`] or
    /// [`Self::rebuild`] first.
    pub fn new(
        store: Arc<dyn WordStore>,
        mirror: Option<Arc<dyn LookupMirror>>,
        mask_char: char,
    ) -> Self {
        let engine = engine_handle();
        Self {
            vocabulary: VocabularyService::new(store, mirror, engine.clone()),
            filter: ContentFilter::new(engine.clone(), mask_char),
            engine,
        }
    }

    /// Startup sequence: bulk import, store load, first engine publish.
    /// Any failure here is fatal for a serving process, which has no
    /// baseline vocabulary to filter with.
    pub async fn bootstrap(&self, word_table: &Path) -> Result<usize, VocabularyError> {
        self.vocabulary.import_table(word_table).await?;
        self.vocabulary.load_from_store().await?;
        self.vocabulary.rebuild()
    }

    /// Filter one outgoing chat message. Synchronous, never fails; see
    /// [`ContentFilter::filter_message`] for pre-publish behavior.
    pub fn filter_message(&self, raw: &str) -> String {
        self.filter.filter_message(raw)
    }

    /// Merged match set for a message (automaton + evasion detector).
    pub fn scan(&self, raw: &str) -> automaton::MatchResult {
        self.filter.scan(raw)
    }

    /// Administrative word addition. Store first, then cache; no rebuild.
    pub async fn add_word(&self, word: &str) -> Result<bool, VocabularyError> {
        self.vocabulary.add_word(word).await
    }

    /// Build and atomically publish a fresh engine from the current cache.
    pub fn rebuild(&self) -> Result<usize, VocabularyError> {
        self.vocabulary.rebuild()
    }

    /// Whether an engine has been published yet.
    pub fn is_ready(&self) -> bool {
        self.engine.load().is_some()
    }

    /// Words currently cached.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.cached_words()
    }
}
