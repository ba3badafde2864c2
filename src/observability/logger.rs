//! Structured JSON logger
//!
//! - One log line = one event
//! - Deterministic key ordering (event, severity, then fields by key)
//! - Explicit severity levels with a process-wide threshold
//! - Synchronous, no buffering
//! - Written to stderr; stdout belongs to the caller

use std::fmt::{self, Write as _};
use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Per-field walk detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Rejected input
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Threshold in effect until [`Logger::set_level`] is called
pub const DEFAULT_LEVEL: Severity = Severity::Warn;

/// Minimum severity written; lower severities are dropped.
static LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LEVEL as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Sets the minimum severity for the whole process
    pub fn set_level(level: Severity) {
        LEVEL.store(level as u8, Ordering::Relaxed);
    }

    /// Returns the current minimum severity
    pub fn level() -> Severity {
        Severity::from_u8(LEVEL.load(Ordering::Relaxed))
    }

    /// Whether events at `severity` are currently written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::level()
    }

    /// Writes one event line to stderr if `severity` passes the threshold.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if Self::enabled(severity) {
            emit(&mut io::stderr().lock(), &render(severity, event, fields));
        }
    }
}

/// Renders `{"event":..,"severity":..,<fields sorted by key>}` plus newline.
fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut ordered = fields.to_vec();
    ordered.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut line = String::with_capacity(64 + fields.len() * 32);
    line.push('{');
    push_pair(&mut line, "event", event);
    line.push(',');
    push_pair(&mut line, "severity", severity.as_str());
    for (key, value) in ordered {
        line.push(',');
        push_pair(&mut line, key, value);
    }
    line.push_str("}\n");
    line
}

fn push_pair(line: &mut String, key: &str, value: &str) {
    push_quoted(line, key);
    line.push(':');
    push_quoted(line, value);
}

fn push_quoted(line: &mut String, text: &str) {
    line.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                line.push('\\');
                line.push(c);
            }
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(line, "\\u{:04x}", c as u32);
            }
            c => line.push(c),
        }
    }
    line.push('"');
}

/// Logging never fails the caller; write errors are dropped.
fn emit<W: io::Write>(out: &mut W, line: &str) {
    let _ = out.write_all(line.as_bytes());
    let _ = out.flush();
}

/// Renders a line regardless of the threshold
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    emit(&mut buffer, &render(severity, event, fields));
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_threshold_order() {
        let levels = [
            Severity::Trace,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ];
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        for severity in levels {
            assert_eq!(Severity::from_u8(severity as u8), severity);
        }
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("trace".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warn);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_line_is_json() {
        let line = capture_log(Severity::Info, "SCHEMA_LOADED", &[("record", "Person")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "SCHEMA_LOADED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["record"], "Person");
    }

    #[test]
    fn test_fields_sorted_by_key() {
        let a = capture_log(
            Severity::Trace,
            "FIELD_SKIPPED",
            &[("reason", "map"), ("path", "owner.tags")],
        );
        let b = capture_log(
            Severity::Trace,
            "FIELD_SKIPPED",
            &[("path", "owner.tags"), ("reason", "map")],
        );
        assert_eq!(a, b);
        assert!(a.find("\"path\"").unwrap() < a.find("\"reason\"").unwrap());
    }

    #[test]
    fn test_values_are_escaped() {
        let line = capture_log(Severity::Warn, "X", &[("pattern", "^\"a\"\\d+\n\u{1}$")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["pattern"], "^\"a\"\\d+\n\u{1}$");
        assert_eq!(line.matches('\n').count(), 1);
    }
}
