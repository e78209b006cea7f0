//! Replacement of detected words with fixed-length mask runs.

/// Replaces every literal occurrence of each matched word with a run of the
/// mask character whose length equals the word's code-point count.
#[derive(Debug, Clone, Copy)]
pub struct Masker {
    mask: char,
}

pub const DEFAULT_MASK: char = '*';

impl Masker {
    pub fn new(mask: char) -> Self {
        Self { mask }
    }

    /// Mask every occurrence of every word in `words` within `text`.
    /// Replacement is exhaustive; order across words is unspecified.
    pub fn mask<'a>(&self, text: &str, words: impl IntoIterator<Item = &'a str>) -> String {
        let mut out = text.to_string();
        for word in words {
            if word.is_empty() {
                continue;
            }
            let run: String = std::iter::repeat(self.mask)
                .take(word.chars().count())
                .collect();
            out = out.replace(word, &run);
        }
        out
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new(DEFAULT_MASK)
    }
}
