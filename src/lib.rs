//! fieldrule - constraint annotations for record fields
//!
//! Records expose their fields through [`Reflect`]; each field may carry an
//! annotation such as `"int,min:1,max:120"` or `"string,regex:^[a-z]+$"`.
//! Validation walks the record depth-first and stops at the first field
//! whose primitive value breaks a constraint.
//!
//! Subsystems:
//! - rules: annotation parsing and primitive evaluators
//! - reflect: the record view and the shape classifier
//! - validator: the record walker and its entry point
//! - group: ordered validation of independent units
//! - schema: records described as JSON schemas
//! - observability: structured logging
//! - cli: the `fieldrule` binary

pub mod cli;
pub mod group;
pub mod observability;
pub mod reflect;
pub mod rules;
pub mod schema;
pub mod validator;

pub use group::{
    CancelToken, Context, GroupError, GroupValidator, RecordUnit, SimpleGroupValidator,
    UnitError, ValidationUnit,
};
pub use reflect::{Field, Node, RecordView, Reflect, Shape};
pub use validator::{FieldPath, RecordValidator, ValidatorOptions, Violation, ViolationKind};

/// Validates `value` with default options.
///
/// True iff `value` is a record, or a pointer to one, and every annotated
/// primitive field satisfies its constraints.
pub fn validate<T: Reflect + ?Sized>(value: &T) -> bool {
    RecordValidator::default().validate(value)
}

/// Like [`validate`], returning the first violation.
pub fn check<T: Reflect + ?Sized>(value: &T) -> Result<(), Violation> {
    RecordValidator::default().check(value)
}
