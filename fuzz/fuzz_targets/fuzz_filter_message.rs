//! Fuzz target for the message filtering pipeline.
//!
//! Tests that arbitrary strings cannot cause panics in filter_message and
//! that masking never leaves a literal vocabulary word behind.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

use wordguard::automaton::AutomatonBuilder;
use wordguard::filter::{engine_handle, ContentFilter, FilterEngine, SplitEvasionDetector};

fuzz_target!(|data: &str| {
    let words: Vec<String> = vec!["bad".into(), "废物".into(), "a.b".into()];
    let mut builder = AutomatonBuilder::new();
    for w in &words {
        builder.insert(w);
    }
    let handle = engine_handle();
    handle.store(Some(Arc::new(FilterEngine {
        automaton: builder.build(),
        evasion: SplitEvasionDetector::compile(&words).expect("static patterns compile"),
    })));
    let filter = ContentFilter::new(handle, '*');

    // filter_message and scan should never panic on any input.
    let masked = filter.filter_message(data);
    let _ = filter.scan(data);

    // Masking is exhaustive: no literal vocabulary word survives.
    for w in &words {
        assert!(
            !masked.contains(w.as_str()),
            "literal vocabulary word survived masking"
        );
    }
});
