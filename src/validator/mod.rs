//! Record validator
//!
//! Validates a record against the constraint annotations on its fields.
//!
//! # Semantics
//!
//! - Only records (or one pointer to a record) are accepted at the top
//! - Constraints apply at primitive leaves; records, pointers and
//!   sequences are traversed
//! - The first failing field ends validation
//! - Unsupported shapes (maps, booleans, ...) are skipped
//! - Validation never mutates the value and keeps no state between calls

mod context;
mod errors;
mod walker;

use serde::{Deserialize, Serialize};

use crate::observability::{event_enabled, log_event, Event};
use crate::reflect::Reflect;
use crate::rules::LengthUnit;

pub use errors::{FieldPath, PathSegment, Violation, ViolationKind};

use walker::Walker;

/// Options for a [`RecordValidator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// How string length is measured for `min`/`max`
    pub length_unit: LengthUnit,
}

/// Validates reflected records.
///
/// Holds only options; every call gets its own walk state, so one
/// validator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    options: ValidatorOptions,
}

impl RecordValidator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Returns true iff `value` is a record (or a pointer to one) and every
    /// field satisfies its constraints.
    pub fn validate<T: Reflect + ?Sized>(&self, value: &T) -> bool {
        self.check(value).is_ok()
    }

    /// Like [`validate`](Self::validate), reporting the first failure.
    pub fn check<T: Reflect + ?Sized>(&self, value: &T) -> Result<(), Violation> {
        let mut walker = Walker::new(&self.options);
        let verdict = walker.enter(value.reflect(), 0);
        debug_assert_eq!(walker.tag_depth(), 0, "tag stack unbalanced after walk");

        if let Err(violation) = &verdict {
            let event = if violation.path.is_root() {
                Event::ValidationRejected
            } else {
                Event::ValidationFailed
            };
            if event_enabled(event) {
                let path = violation.path.to_string();
                let reason = violation.kind.to_string();
                log_event(
                    event,
                    &[
                        ("code", violation.code()),
                        ("path", path.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
            }
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Login {
        name: String,
    }
    crate::impl_record!(Login { name: "string,max:3" });

    #[test]
    fn test_length_unit_option() {
        let login = Login { name: "äöü".into() };

        let bytes = RecordValidator::default();
        assert!(!bytes.validate(&login));

        let chars = RecordValidator::new(ValidatorOptions {
            length_unit: LengthUnit::Chars,
        });
        assert!(chars.validate(&login));
    }

    #[test]
    fn test_check_reports_path() {
        let login = Login {
            name: "toolong".into(),
        };
        let violation = RecordValidator::default().check(&login).unwrap_err();
        assert_eq!(violation.path.to_string(), "name");
        assert_eq!(violation.code(), "RULE_TOO_LONG");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ValidatorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.length_unit, LengthUnit::Bytes);

        let options: ValidatorOptions =
            serde_json::from_str(r#"{"length_unit":"chars"}"#).unwrap();
        assert_eq!(options.length_unit, LengthUnit::Chars);
    }
}
