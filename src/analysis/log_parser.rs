//! Log file parsing.
//!
//! Turns the harness's plain-text log lines into typed [`Event`]s. Each
//! line is expected to look like `[YYYY-MM-DD HH:MM:SS] message`; lines
//! that do not match are dropped without comment.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::sync::LazyLock;

use color_eyre::eyre::{Context, Result};
use regex::Regex;

use super::types::Event;

/// Compiled regex patterns for log parsing
pub struct LogPatterns {
    /// Match: "[<timestamp-ish>] <message>". The bracket class is
    /// deliberately loose; the strict check happens in chrono.
    pub log_line: Regex,
    /// Match: "seq=N"
    pub seq: Regex,
    /// Match: "attempt=N"
    pub attempt: Regex,
    /// Match: "DELAYED Nms"
    pub delay_ms: Regex,
}

impl LogPatterns {
    pub fn new() -> Self {
        Self {
            log_line: Regex::new(r"^\[([0-9\-: ]+)\] (.+)$").expect("Invalid log_line regex"),
            seq: Regex::new(r"seq=(\d+)").expect("Invalid seq regex"),
            attempt: Regex::new(r"attempt=(\d+)").expect("Invalid attempt regex"),
            delay_ms: Regex::new(r"DELAYED (\d+)ms").expect("Invalid delay_ms regex"),
        }
    }
}

impl Default for LogPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<LogPatterns> = LazyLock::new(LogPatterns::new);

/// Strict timestamp format used by client, server, and proxy alike.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a single log file into events, preserving line order.
///
/// A missing file is not an error: the warning is part of the report
/// (it goes to stdout, same stream as the statistics) and the file is
/// treated as empty input. Any other I/O failure is fatal.
pub fn parse_log_file(path: &Path) -> Result<Vec<Event>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("Warning: {} not found", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open log file: {}", path.display()));
        }
    };
    let reader = BufReader::new(file);

    let mut events = Vec::new();
    for line_result in reader.lines() {
        let line = line_result
            .with_context(|| format!("Failed to read log file: {}", path.display()))?;
        if let Some(event) = parse_line(line.trim_end()) {
            events.push(event);
        }
    }

    log::debug!("Parsed {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Parse one trimmed line, or None if it is noise.
fn parse_line(line: &str) -> Option<Event> {
    let caps = PATTERNS.log_line.captures(line)?;
    let timestamp_str = caps.get(1)?.as_str();
    let message = caps.get(2)?.as_str();

    // Bracket contents that looked plausible but fail the strict parse
    // are dropped, same as lines with no bracket at all.
    let timestamp =
        chrono::NaiveDateTime::parse_from_str(timestamp_str, TIMESTAMP_FORMAT).ok()?;

    Some(Event {
        timestamp,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_line_well_formed() {
        let event = parse_line("[2024-03-01 12:00:05] SEND: seq=1, attempt=1").unwrap();
        assert_eq!(event.message, "SEND: seq=1, attempt=1");
        assert_eq!(
            event.timestamp,
            chrono::NaiveDateTime::parse_from_str("2024-03-01 12:00:05", "%Y-%m-%d %H:%M:%S")
                .unwrap()
        );
    }

    #[test]
    fn test_parse_line_rejects_noise() {
        // No bracket prefix at all
        assert!(parse_line("SEND: seq=1").is_none());
        // Plausible bracket content that is not a real timestamp
        assert!(parse_line("[2024-13-99 99:99:99] SEND: seq=1").is_none());
        // Bracket content with characters outside the permissive class
        assert!(parse_line("[not a timestamp] SEND: seq=1").is_none());
        // Empty message
        assert!(parse_line("[2024-03-01 12:00:05] ").is_none());
    }

    #[test]
    fn test_parse_log_file_preserves_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[2024-03-01 12:00:02] second timestamp, first line").unwrap();
        writeln!(file, "garbage line").unwrap();
        writeln!(file, "[2024-03-01 12:00:01] first timestamp, second line").unwrap();
        file.flush().unwrap();

        let events = parse_log_file(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        // File order, not timestamp order
        assert!(events[0].message.ends_with("first line"));
        assert!(events[1].message.ends_with("second line"));
    }

    #[test]
    fn test_parse_log_file_all_well_formed() {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..5 {
            writeln!(file, "[2024-03-01 12:00:0{i}] line {i}").unwrap();
        }
        file.flush().unwrap();

        let events = parse_log_file(file.path()).unwrap();
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_parse_log_file_missing_is_empty() {
        let events = parse_log_file(Path::new("no_such_file.log")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_seq_and_attempt_patterns() {
        let caps = PATTERNS.seq.captures("SEND: seq=42, attempt=3").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "42");

        let caps = PATTERNS.attempt.captures("TIMEOUT: seq=42, attempt=3").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "3");

        let caps = PATTERNS.delay_ms.captures("C->S: DELAYED 30ms").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "30");
    }
}
