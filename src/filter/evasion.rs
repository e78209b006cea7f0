//! Detection of sensitive words typed with filler between their characters.
//!
//! Users dodge exact matching by inserting punctuation or spaces inside a
//! banned word ("b.a.d"). For each vocabulary word this detector compiles a
//! pattern meaning "the word's characters, in order, with arbitrary
//! intervening characters" and tests it against the raw message.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvasionError {
    #[error("evasion pattern for {word:?} failed to compile: {source}")]
    Pattern {
        word: String,
        source: regex::Error,
    },
}

/// Per-word split-evasion matcher.
///
/// Every scan tests every vocabulary word, so a scan is
/// O(word length × message length) per word in the worst case. Acceptable
/// for chat-sized messages and moderation-sized vocabularies; a large
/// vocabulary would need a cheaper pre-filter in front of this.
pub struct SplitEvasionDetector {
    patterns: Vec<(String, Regex)>,
}

impl SplitEvasionDetector {
    /// Compile one pattern per distinct word in the snapshot. Patterns are
    /// built once here, not per message.
    pub fn compile(words: &[String]) -> Result<Self, EvasionError> {
        let mut patterns = Vec::with_capacity(words.len());
        for word in words {
            if word.is_empty() {
                continue;
            }
            let mut pattern = String::new();
            for ch in word.chars() {
                if !pattern.is_empty() {
                    pattern.push_str(".*?");
                }
                pattern.push_str(&regex::escape(&ch.to_string()));
            }
            let re = Regex::new(&pattern).map_err(|source| EvasionError::Pattern {
                word: word.clone(),
                source,
            })?;
            patterns.push((word.clone(), re));
        }
        Ok(Self { patterns })
    }

    /// Test every vocabulary word against `text`. A word is counted once
    /// per scan regardless of how many times its split form appears.
    pub fn scan(&self, text: &str) -> crate::automaton::MatchResult {
        let mut result = crate::automaton::MatchResult::default();
        for (word, re) in &self.patterns {
            if re.is_match(text) {
                result.add(word, 1);
            }
        }
        result
    }

    /// Number of compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
