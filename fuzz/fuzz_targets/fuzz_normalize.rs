//! Fuzz target for separator normalization.
//!
//! Tests that arbitrary strings cannot cause panics in the normalizer and
//! that the output only ever contains word characters and single spaces.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wordguard::filter::TextNormalizer;

fuzz_target!(|data: &str| {
    let normalizer = TextNormalizer::new();

    // normalize() should never panic on any input.
    let out = normalizer.normalize(data);

    // No leading/trailing separators, no doubled spaces.
    assert_eq!(out.trim(), out);
    assert!(!out.contains("  "), "separator run survived normalization");

    // Normalizing again is a no-op.
    assert_eq!(normalizer.normalize(&out), out);
});
