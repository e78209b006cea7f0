//! Service configuration loading from environment variables.
//!
//! All configuration values are loaded from `WORDGUARD_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `WORDGUARD_WORD_TABLE` | `./sensitive_words.tsv` | Bulk-import word table path |
//! | `WORDGUARD_MASK_CHAR` | `*` | Mask character for detected words |
//! | `WORDGUARD_LOG_LEVEL` | `info` | Log level filter |
//! | `WORDGUARD_LOG_FORMAT` | `json` | Log format (`json` or `pretty`) |

use std::path::PathBuf;

use serde::Serialize;

use crate::telemetry::{LogConfig, LogFormat};

/// Effective configuration summary (serializable, for `config show`-style
/// introspection and logs).
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub word_table: PathBuf,
    pub mask_char: char,
    pub log_level: String,
    pub log_format: String,
}

/// All service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub word_table: PathBuf,
    pub mask_char: char,
    pub log: LogConfig,
}

/// Parse a single-character env var, returning `default` on missing,
/// empty, or multi-character values.
fn parse_char(key: &str, default: char) -> char {
    match std::env::var(key) {
        Ok(val) => {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => default,
            }
        }
        Err(_) => default,
    }
}

/// Parse a string env var, returning `default` when missing or empty.
fn parse_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => default.to_string(),
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    let word_table = PathBuf::from(parse_string("WORDGUARD_WORD_TABLE", "./sensitive_words.tsv"));
    let mask_char = parse_char("WORDGUARD_MASK_CHAR", '*');
    let level = parse_string("WORDGUARD_LOG_LEVEL", "info");
    let format = match parse_string("WORDGUARD_LOG_FORMAT", "json").as_str() {
        "pretty" => LogFormat::Pretty,
        _ => LogFormat::Json,
    };

    EnvConfig {
        word_table,
        mask_char,
        log: LogConfig { format, level },
    }
}

impl EnvConfig {
    /// Return a serializable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            word_table: self.word_table.clone(),
            mask_char: self.mask_char,
            log_level: self.log.level.clone(),
            log_format: match self.log.format {
                LogFormat::Json => "json".to_string(),
                LogFormat::Pretty => "pretty".to_string(),
            },
        }
    }
}
