//! Group validation
//!
//! Runs an ordered list of independent validation units and stops at the
//! first one that fails. The group never looks inside the units.

mod context;

use thiserror::Error;

use crate::observability::{log_event, Event};
use crate::reflect::Reflect;
use crate::validator::RecordValidator;

pub use context::{CancelToken, Context};

/// Error reported by a single unit
pub type UnitError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can validate itself
pub trait ValidationUnit {
    fn validate(&self, ctx: &Context) -> Result<(), UnitError>;
}

/// Group failure
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("validation unit {index} failed: {source}")]
    Unit {
        index: usize,
        #[source]
        source: UnitError,
    },

    #[error("group validation cancelled after {completed} unit(s)")]
    Cancelled { completed: usize },
}

impl GroupError {
    /// Index of the failing unit, if a unit failed
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            GroupError::Unit { index, .. } => Some(*index),
            GroupError::Cancelled { .. } => None,
        }
    }
}

/// Validates a list of units
pub trait GroupValidator {
    fn validate(&self, ctx: &Context, units: &[&dyn ValidationUnit]) -> Result<(), GroupError>;
}

/// Runs units in order, first failure wins. An empty list succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleGroupValidator;

impl SimpleGroupValidator {
    pub fn new() -> Self {
        Self
    }
}

impl GroupValidator for SimpleGroupValidator {
    fn validate(&self, ctx: &Context, units: &[&dyn ValidationUnit]) -> Result<(), GroupError> {
        for (index, unit) in units.iter().enumerate() {
            if ctx.is_cancelled() {
                let completed = index.to_string();
                log_event(Event::GroupCancelled, &[("completed", completed.as_str())]);
                return Err(GroupError::Cancelled { completed: index });
            }

            if let Err(source) = unit.validate(ctx) {
                let position = index.to_string();
                let reason = source.to_string();
                log_event(
                    Event::GroupUnitFailed,
                    &[("index", position.as_str()), ("reason", reason.as_str())],
                );
                return Err(GroupError::Unit { index, source });
            }
        }
        Ok(())
    }
}

/// Adapts a reflected record into a [`ValidationUnit`].
pub struct RecordUnit<'a, T: Reflect + ?Sized> {
    validator: &'a RecordValidator,
    value: &'a T,
}

impl<'a, T: Reflect + ?Sized> RecordUnit<'a, T> {
    pub fn new(validator: &'a RecordValidator, value: &'a T) -> Self {
        Self { validator, value }
    }
}

impl<T: Reflect + ?Sized> ValidationUnit for RecordUnit<'_, T> {
    fn validate(&self, _ctx: &Context) -> Result<(), UnitError> {
        self.validator.check(self.value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        fail: bool,
        runs: Cell<usize>,
    }

    impl Fixed {
        fn ok() -> Self {
            Self {
                fail: false,
                runs: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                runs: Cell::new(0),
            }
        }
    }

    impl ValidationUnit for Fixed {
        fn validate(&self, _ctx: &Context) -> Result<(), UnitError> {
            self.runs.set(self.runs.get() + 1);
            if self.fail {
                Err("unit rejected".into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_empty_group_succeeds() {
        let group = SimpleGroupValidator::new();
        assert!(group.validate(&Context::background(), &[]).is_ok());
    }

    #[test]
    fn test_all_units_pass() {
        let (a, b) = (Fixed::ok(), Fixed::ok());
        let group = SimpleGroupValidator::new();
        assert!(group.validate(&Context::background(), &[&a, &b]).is_ok());
        assert_eq!(a.runs.get(), 1);
        assert_eq!(b.runs.get(), 1);
    }

    #[test]
    fn test_first_failure_wins() {
        let (a, b, c) = (Fixed::ok(), Fixed::failing(), Fixed::failing());
        let err = SimpleGroupValidator::new()
            .validate(&Context::background(), &[&a, &b, &c])
            .unwrap_err();
        assert_eq!(err.failed_index(), Some(1));
        assert!(err.to_string().contains("unit rejected"));
        assert_eq!(c.runs.get(), 0);
    }

    #[test]
    fn test_cancelled_context_stops_group() {
        let (ctx, token) = Context::with_cancel();
        token.cancel();
        let a = Fixed::ok();
        let err = SimpleGroupValidator::new()
            .validate(&ctx, &[&a])
            .unwrap_err();
        assert!(matches!(err, GroupError::Cancelled { completed: 0 }));
        assert_eq!(a.runs.get(), 0);
    }

    struct Quota {
        used: u32,
    }
    crate::impl_record!(Quota { used: "uint,max:10" });

    #[test]
    fn test_record_unit_reports_violation() {
        let validator = RecordValidator::default();
        let fine = Quota { used: 3 };
        let over = Quota { used: 11 };
        let (first, second) = (
            RecordUnit::new(&validator, &fine),
            RecordUnit::new(&validator, &over),
        );
        let units: [&dyn ValidationUnit; 2] = [&first, &second];

        let err = SimpleGroupValidator::new()
            .validate(&Context::background(), &units)
            .unwrap_err();
        assert_eq!(err.failed_index(), Some(1));
        assert!(err.to_string().contains("used"));
    }
}
