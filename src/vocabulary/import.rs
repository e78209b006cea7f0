//! Bulk vocabulary import from a delimited word table.
//!
//! The table is a plain-text spreadsheet export: the first row is a header
//! and is skipped; each subsequent row's cells are split on tabs or commas;
//! every non-empty trimmed cell is one vocabulary word. A missing,
//! unreadable, or empty table is an error: startup cannot proceed without
//! a baseline vocabulary.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read word table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("word table {path} contains no words")]
    Empty { path: PathBuf },
}

/// Read and parse the word table at `path`.
pub fn read_word_table(path: &Path) -> Result<Vec<String>, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_word_table(&content);
    if words.is_empty() {
        return Err(ImportError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(words)
}

/// Parse table content: skip the header row, split cells on tab or comma,
/// keep every non-empty trimmed cell. Duplicates are kept here; the cache
/// and store both deduplicate on insert.
pub fn parse_word_table(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .flat_map(|line| line.split(['\t', ',']))
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
