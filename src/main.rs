//! wordguard CLI entry point.
//!
//! Bootstraps the filter service from a word table and drives it:
//!
//! - `wordguard-cli run` - filter stdin lines to stdout (default)
//! - `wordguard-cli check <text>` - print a JSON match report for one message
//! - `wordguard-cli config` - print the effective configuration as JSON
//! - `wordguard-cli version` / `help`
//!
//! Startup is fail-fast: a missing or empty word table aborts the process
//! with a descriptive error, since the service cannot moderate without a
//! baseline vocabulary.

use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use wordguard::config;
use wordguard::telemetry::init_logging;
use wordguard::vocabulary::MemoryWordStore;
use wordguard::FilterService;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("run");

    let cfg = config::load();
    if let Err(e) = init_logging(&cfg.log) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match command {
        "run" | "" => match bootstrap_service(&cfg).await {
            Ok(service) => run_filter_loop(service).await,
            Err(code) => code,
        },
        "check" => {
            let Some(text) = args.get(2) else {
                eprintln!("Usage: wordguard-cli check <text>");
                return ExitCode::FAILURE;
            };
            match bootstrap_service(&cfg).await {
                Ok(service) => run_check(&service, text),
                Err(code) => code,
            }
        }
        "config" => {
            match serde_json::to_string_pretty(&cfg.effective_config()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to serialize config: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        "version" | "--version" | "-V" => {
            println!("wordguard {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Build the service and run the fatal startup sequence (import, load,
/// first publish).
async fn bootstrap_service(cfg: &config::EnvConfig) -> Result<FilterService, ExitCode> {
    let store = Arc::new(MemoryWordStore::new());
    let service = FilterService::new(store, None, cfg.mask_char);

    match service.bootstrap(&cfg.word_table).await {
        Ok(count) => {
            tracing::info!(words = count, "filter service ready");
            Ok(service)
        }
        Err(e) => {
            eprintln!("Startup failed: {}", e);
            eprintln!("Cannot serve without a baseline vocabulary. Aborting.");
            Err(ExitCode::FAILURE)
        }
    }
}

/// Filter stdin to stdout, one message per line.
async fn run_filter_loop(service: FilterService) -> ExitCode {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let masked = service.filter_message(&line);
                let out = format!("{}\n", masked);
                if stdout.write_all(out.as_bytes()).await.is_err() {
                    return ExitCode::FAILURE;
                }
            }
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("stdin read error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
}

/// One matched word in the check report.
#[derive(Serialize)]
struct ReportedMatch {
    word: String,
    count: u64,
}

/// JSON report for `check`: what matched and the masked result.
#[derive(Serialize)]
struct CheckReport {
    matches: Vec<ReportedMatch>,
    masked: String,
}

fn run_check(service: &FilterService, text: &str) -> ExitCode {
    let result = service.scan(text);
    let mut matches: Vec<ReportedMatch> = result
        .iter()
        .map(|(word, count)| ReportedMatch {
            word: word.to_string(),
            count,
        })
        .collect();
    matches.sort_by(|a, b| a.word.cmp(&b.word));

    let report = CheckReport {
        matches,
        masked: service.filter_message(text),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("wordguard - sensitive-word detection and masking");
    println!();
    println!("USAGE:");
    println!("    wordguard-cli [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    run              Filter stdin lines to stdout (default)");
    println!("    check <text>     Print a JSON match report for one message");
    println!("    config           Print the effective configuration as JSON");
    println!("    version          Print version information");
    println!("    help             Show this help");
    println!();
    println!("CONFIGURATION (environment):");
    println!("    WORDGUARD_WORD_TABLE    Word table path (default ./sensitive_words.tsv)");
    println!("    WORDGUARD_MASK_CHAR     Mask character (default *)");
    println!("    WORDGUARD_LOG_LEVEL     Log level filter (default info)");
    println!("    WORDGUARD_LOG_FORMAT    json or pretty (default json)");
}
