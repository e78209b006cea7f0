//! Multi-pattern exact-match automaton over Unicode code points.
//!
//! A trie augmented with failure links (Aho-Corasick), built once from a
//! vocabulary snapshot and then scanned concurrently by any number of
//! readers. Nodes live in a contiguous arena and refer to each other by
//! index, so the built automaton is an immutable value with no interior
//! pointers.
//!
//! Construction is split across two types: [`AutomatonBuilder`] accepts
//! insertions and is consumed by [`AutomatonBuilder::build`], which runs the
//! breadth-first failure-link pass exactly once. The resulting
//! [`PatternAutomaton`] exposes only [`PatternAutomaton::scan`]; replacing
//! the vocabulary means building a fresh automaton and swapping it in.

use std::collections::{HashMap, VecDeque};

/// Index of the root node in the arena. The root's failure link points at
/// itself, which terminates every fallback walk.
const ROOT: usize = 0;

/// One trie node. Children and the failure link are arena indices; `output`
/// holds the ids of every word whose match ends at this node, including
/// words inherited through the failure chain at build time.
#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    fail: usize,
    output: Vec<u32>,
}

/// Occurrence counts per matched word for a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    counts: HashMap<String, u64>,
}

impl MatchResult {
    /// Add `n` occurrences of `word`.
    pub fn add(&mut self, word: &str, n: u64) {
        *self.counts.entry(word.to_string()).or_insert(0) += n;
    }

    /// Fold another result into this one, summing counts per word.
    pub fn merge(&mut self, other: MatchResult) {
        for (word, n) in other.counts {
            *self.counts.entry(word).or_insert(0) += n;
        }
    }

    /// Occurrence count for `word` (0 if unmatched).
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// The matched words, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Iterate over (word, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &n)| (w.as_str(), n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

/// Mutable construction phase of the automaton.
///
/// Insertions are idempotent: inserting the same word twice has no
/// additional effect. Empty words are ignored (a sensitive word is a
/// non-empty sequence of code points by definition).
#[derive(Debug)]
pub struct AutomatonBuilder {
    nodes: Vec<Node>,
    words: Vec<String>,
    ids: HashMap<String, u32>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            words: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Add a path from the root through one node per code point of `word`,
    /// creating nodes as needed, and mark the terminal node with the word.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() || self.ids.contains_key(word) {
            return;
        }
        let id = self.words.len() as u32;
        self.words.push(word.to_string());
        self.ids.insert(word.to_string(), id);

        let mut node = ROOT;
        for ch in word.chars() {
            node = match self.nodes[node].children.get(&ch).copied() {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[node].output.push(id);
    }

    /// Number of distinct words inserted so far.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Resolve failure links and inherited outputs in breadth-first order,
    /// consuming the builder. BFS guarantees a node's failure link is fully
    /// resolved before its output set is finalized:
    /// `output[node] = direct(node) ∪ output[fail(node)]`.
    pub fn build(self) -> PatternAutomaton {
        let mut nodes = self.nodes;
        let mut queue = VecDeque::new();

        // Depth-1 nodes fail to the root.
        let first: Vec<usize> = nodes[ROOT].children.values().copied().collect();
        for child in first {
            nodes[child].fail = ROOT;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(char, usize)> = nodes[current]
                .children
                .iter()
                .map(|(&ch, &child)| (ch, child))
                .collect();

            for (ch, child) in edges {
                // Walk the parent's failure chain until some node has a
                // transition on `ch`; fall back to the root otherwise.
                let mut fail = nodes[current].fail;
                while fail != ROOT && !nodes[fail].children.contains_key(&ch) {
                    fail = nodes[fail].fail;
                }
                let target = nodes[fail].children.get(&ch).copied().unwrap_or(ROOT);
                nodes[child].fail = target;

                let inherited = nodes[target].output.clone();
                nodes[child].output.extend(inherited);
                queue.push_back(child);
            }
        }

        PatternAutomaton {
            nodes,
            words: self.words,
        }
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable, concurrently shareable multi-pattern matcher.
#[derive(Debug)]
pub struct PatternAutomaton {
    nodes: Vec<Node>,
    words: Vec<String>,
}

impl PatternAutomaton {
    /// Scan `text` and count every occurrence of every vocabulary word,
    /// overlaps included. Runs in O(text length + total matches) regardless
    /// of vocabulary size. Never fails; empty input yields an empty result.
    pub fn scan(&self, text: &str) -> MatchResult {
        let mut result = MatchResult::default();
        let mut state = ROOT;

        for ch in text.chars() {
            while state != ROOT && !self.nodes[state].children.contains_key(&ch) {
                state = self.nodes[state].fail;
            }
            state = self.nodes[state].children.get(&ch).copied().unwrap_or(ROOT);

            for &id in &self.nodes[state].output {
                result.add(&self.words[id as usize], 1);
            }
        }
        result
    }

    /// The vocabulary this automaton was built from.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Total number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> PatternAutomaton {
        let mut builder = AutomatonBuilder::new();
        for w in words {
            builder.insert(w);
        }
        builder.build()
    }

    #[test]
    fn test_single_word_counted_per_occurrence() {
        let ac = build(&["bad"]);
        let result = ac.scan("bad things badly, bad");
        assert_eq!(result.count("bad"), 3);
    }

    #[test]
    fn test_overlapping_matches_via_failure_links() {
        // Classic Aho-Corasick witness: "ushers" contains "she" and,
        // nested inside its span, "he".
        let ac = build(&["he", "she", "his"]);
        let result = ac.scan("ushers");
        assert_eq!(result.count("she"), 1);
        assert_eq!(result.count("he"), 1);
        assert_eq!(result.count("his"), 0);
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let ac = build(&["bad"]);
        assert!(ac.scan("").is_empty());
    }

    #[test]
    fn test_no_vocabulary_word_present() {
        let ac = build(&["bad", "worse"]);
        assert!(ac.scan("perfectly fine sentence").is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("dup");
        builder.insert("dup");
        assert_eq!(builder.word_count(), 1);

        let ac = builder.build();
        assert_eq!(ac.scan("dup dup").count("dup"), 2);
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut builder = AutomatonBuilder::new();
        builder.insert("");
        builder.insert("ok");
        assert_eq!(builder.word_count(), 1);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = build(&["he", "she", "his", "hers"]);
        let b = build(&["hers", "his", "he", "she"]);
        let text = "ushers and his heirs";
        assert_eq!(a.scan(text), b.scan(text));
    }

    #[test]
    fn test_cjk_words_match_per_code_point() {
        let ac = build(&["废物", "混蛋"]);
        let result = ac.scan("他真是个废物，混蛋！废物！");
        assert_eq!(result.count("废物"), 2);
        assert_eq!(result.count("混蛋"), 1);
    }

    #[test]
    fn test_word_nested_in_longer_word() {
        let ac = build(&["ass", "assassin"]);
        let result = ac.scan("assassin");
        assert_eq!(result.count("assassin"), 1);
        assert_eq!(result.count("ass"), 2);
    }

    #[test]
    fn test_match_result_merge_sums_counts() {
        let mut a = MatchResult::default();
        a.add("bad", 2);
        let mut b = MatchResult::default();
        b.add("bad", 1);
        b.add("worse", 1);
        a.merge(b);
        assert_eq!(a.count("bad"), 3);
        assert_eq!(a.count("worse"), 1);
        assert_eq!(a.len(), 2);
    }
}
