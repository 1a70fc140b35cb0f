//! # Debugging and Logging Utilities
//!
//! Conditional logging for the compiler pipeline. Everything here writes to
//! stderr, because stdout carries the generated assembly.

use std::time::Instant;

/// Stage logging is enabled by setting the `MICROCC_DEBUG` environment
/// variable.
pub fn is_debug_enabled() -> bool {
    std::env::var("MICROCC_DEBUG").is_ok()
}

/// Phase timing is enabled by setting the `MICROCC_VERBOSE` environment
/// variable.
pub fn is_perf_enabled() -> bool {
    std::env::var("MICROCC_VERBOSE").is_ok()
}

pub fn log_lexer(msg: &str) {
    if is_debug_enabled() {
        eprintln!("LEXER: {msg}");
    }
}

pub fn log_parser(msg: &str) {
    if is_debug_enabled() {
        eprintln!("PARSER: {msg}");
    }
}

pub fn log_codegen(msg: &str) {
    if is_debug_enabled() {
        eprintln!("CODEGEN: {msg}");
    }
}

/// Times one operation from construction to `finish`.
///
/// Usage: `let timer = PerfTimer::new("codegen"); ... timer.finish();`
pub struct PerfTimer {
    start: Instant,
    label: String,
}

impl PerfTimer {
    pub fn new(label: &str) -> Self {
        Self {
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    /// Reports the elapsed time when verbose tracking is active.
    pub fn finish(self) {
        if is_perf_enabled() {
            eprintln!("{}: {:?}", self.label, self.start.elapsed());
        }
    }
}
