//! Message filtering pipeline for chat text.
//!
//! [`ContentFilter`] is the single entry point the chat pipeline calls per
//! outgoing message: scan the raw text with the exact-match automaton and
//! the split-evasion detector, merge the matches, then substitute masked
//! replacements into the normalized text.
//!
//! The automaton and evasion detector are bundled into one immutable
//! [`FilterEngine`] snapshot behind an atomically swappable handle, so
//! vocabulary rebuilds publish a whole new engine and in-flight scans see
//! either the old or the new one, never a partially built state.

mod evasion;
mod mask;
mod normalize;

pub use evasion::{EvasionError, SplitEvasionDetector};
pub use mask::{Masker, DEFAULT_MASK};
pub use normalize::TextNormalizer;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, warn};

use crate::automaton::{MatchResult, PatternAutomaton};

/// One immutable vocabulary snapshot: the built automaton plus the evasion
/// patterns compiled from the same word list.
pub struct FilterEngine {
    pub automaton: PatternAutomaton,
    pub evasion: SplitEvasionDetector,
}

/// Shared, atomically replaceable reference to the current engine.
/// `None` until the first vocabulary rebuild publishes a snapshot.
pub type EngineHandle = Arc<ArcSwapOption<FilterEngine>>;

/// Create an empty engine handle, shared between the vocabulary service
/// (writer) and content filters (readers).
pub fn engine_handle() -> EngineHandle {
    Arc::new(ArcSwapOption::empty())
}

/// Facade over the scan/normalize/mask pipeline.
///
/// Pure with respect to caller-visible state and deterministic for a fixed
/// engine; safe to call from any number of threads concurrently.
pub struct ContentFilter {
    engine: EngineHandle,
    normalizer: TextNormalizer,
    masker: Masker,
}

impl ContentFilter {
    pub fn new(engine: EngineHandle, mask: char) -> Self {
        Self {
            engine,
            normalizer: TextNormalizer::new(),
            masker: Masker::new(mask),
        }
    }

    /// Scan the raw message with both detectors and return the merged
    /// match set (automaton counts plus evasion presence counts).
    /// Empty until an engine has been published.
    pub fn scan(&self, raw: &str) -> MatchResult {
        let guard = self.engine.load();
        let Some(engine) = guard.as_deref() else {
            return MatchResult::default();
        };
        let mut matches = engine.automaton.scan(raw);
        matches.merge(engine.evasion.scan(raw));
        matches
    }

    /// Filter one outgoing chat message: detect, normalize, mask.
    ///
    /// Scans read the raw text; masking writes onto the normalized text.
    /// Before the first vocabulary publish this returns the normalized text
    /// unmasked and logs a warning, so the pipeline degrades to
    /// pass-through rather than failing the message.
    pub fn filter_message(&self, raw: &str) -> String {
        let normalized = self.normalizer.normalize(raw);

        let guard = self.engine.load();
        let Some(engine) = guard.as_deref() else {
            warn!("no filter engine published yet; message passed through unmasked");
            return normalized;
        };

        let mut matches = engine.automaton.scan(raw);
        matches.merge(engine.evasion.scan(raw));
        if matches.is_empty() {
            return normalized;
        }

        debug!(words = matches.len(), "masking sensitive words");
        self.masker.mask(&normalized, matches.words())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;

    fn publish(engine: &EngineHandle, words: &[&str]) {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let mut builder = AutomatonBuilder::new();
        for w in &words {
            builder.insert(w);
        }
        engine.store(Some(Arc::new(FilterEngine {
            automaton: builder.build(),
            evasion: SplitEvasionDetector::compile(&words).unwrap(),
        })));
    }

    #[test]
    fn test_unpublished_engine_passes_normalized_text_through() {
        let filter = ContentFilter::new(engine_handle(), DEFAULT_MASK);
        assert_eq!(filter.filter_message("hello... world"), "hello world");
        assert!(filter.scan("hello bad world").is_empty());
    }

    #[test]
    fn test_clean_message_only_collapses_separators() {
        let handle = engine_handle();
        publish(&handle, &["badword"]);
        let filter = ContentFilter::new(handle, DEFAULT_MASK);
        assert_eq!(
            filter.filter_message("nothing!!  to see -- here"),
            "nothing to see here"
        );
    }

    #[test]
    fn test_detected_word_is_masked_in_normalized_text() {
        let handle = engine_handle();
        publish(&handle, &["badword"]);
        let filter = ContentFilter::new(handle, DEFAULT_MASK);
        let out = filter.filter_message("This is a badword in a sentence.");
        assert_eq!(out, "This is a ******* in a sentence");
        assert!(!out.contains("badword"));
    }

    #[test]
    fn test_scan_merges_automaton_and_evasion_counts() {
        let handle = engine_handle();
        publish(&handle, &["bad"]);
        let filter = ContentFilter::new(handle, DEFAULT_MASK);
        // Exact occurrence counted by the automaton (1) and the evasion
        // detector's presence check (1).
        let matches = filter.scan("bad");
        assert_eq!(matches.count("bad"), 2);
    }

    #[test]
    fn test_split_evasion_included_in_match_set() {
        let handle = engine_handle();
        publish(&handle, &["bad"]);
        let filter = ContentFilter::new(handle, DEFAULT_MASK);
        let matches = filter.scan("b.a.d");
        assert_eq!(matches.count("bad"), 1);
    }
}
