//! Observability for validation
//!
//! Structured JSON logging of lifecycle and diagnostic events.
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a verdict
//! 2. No async or background threads
//! 3. Deterministic output
//! 4. Events below the configured severity cost one atomic load
//!
//! # Usage
//!
//! ```ignore
//! use fieldrule::observability::{log_event, Event, Logger, Severity};
//!
//! Logger::set_level(Severity::Trace);
//! log_event(Event::FieldSkipped, &[("path", "owner.tags"), ("reason", "map")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, DEFAULT_LEVEL};

/// Log a typed event with fields at the event's own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Whether `event` would currently be written
///
/// Lets callers skip building field values for filtered events.
pub fn event_enabled(event: Event) -> bool {
    Logger::enabled(event.severity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::SchemaLoaded, &[("path", "/tmp/schema.json")]);
        log_event(Event::FieldSkipped, &[]);
    }

    #[test]
    fn test_default_threshold_filters_walk_detail() {
        let default = DEFAULT_LEVEL;
        assert!(Event::FieldSkipped.severity() < default);
        assert!(Event::ValidationFailed.severity() < default);
        assert!(Event::SchemaLoaded.severity() < default);
        assert!(Event::ValidationRejected.severity() >= default);
        assert!(Event::DocumentRejected.severity() >= default);
    }
}
