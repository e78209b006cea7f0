//! Separator collapsing applied before masked replacements are substituted.

use regex::Regex;

/// Pattern matching every maximal run of non-word characters. Word
/// characters are ASCII letters, ASCII digits, and Han ideographs.
const SEPARATOR_RUN: &str = r"[^a-zA-Z0-9\p{Han}]+";

/// Collapses runs of punctuation/whitespace into single spaces.
///
/// The normalized form is only the carrier the masker writes into; the
/// automaton and evasion scans always read the raw message.
pub struct TextNormalizer {
    separators: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // Pattern is a compile-time constant; construction cannot fail.
            separators: Regex::new(SEPARATOR_RUN).expect("separator pattern is valid"),
        }
    }

    /// Replace every maximal run of non-word characters with a single
    /// space and trim leading/trailing separators.
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = self.separators.replace_all(text, " ");
        collapsed
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
