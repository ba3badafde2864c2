//! Observable events
//!
//! Events are explicit and typed; the logger only sees their names.

use std::fmt;

use super::logger::Severity;

/// Events emitted during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Record walk
    /// A field or sequence was skipped (unsupported shape or nil pointer)
    FieldSkipped,
    /// A record failed its constraints
    ValidationFailed,
    /// The top-level value is not a record
    ValidationRejected,

    // Group validation
    /// A unit in a group reported a failure
    GroupUnitFailed,
    /// A group stopped because its context was cancelled
    GroupCancelled,

    // Schema handling
    /// A schema file was loaded
    SchemaLoaded,
    /// A document did not match the shape its schema declares
    DocumentRejected,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FieldSkipped => "FIELD_SKIPPED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::GroupUnitFailed => "GROUP_UNIT_FAILED",
            Event::GroupCancelled => "GROUP_CANCELLED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::DocumentRejected => "DOCUMENT_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::FieldSkipped | Event::ValidationFailed => Severity::Trace,
            Event::GroupUnitFailed | Event::SchemaLoaded => Severity::Info,
            Event::ValidationRejected | Event::GroupCancelled | Event::DocumentRejected => {
                Severity::Warn
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
