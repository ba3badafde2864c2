//! Constraint rules attached to record fields
//!
//! A field annotation such as `"string,min:6,max:20"` is parsed into a
//! [`ConstraintList`] and checked against primitive leaf values.
//!
//! # Semantics
//!
//! - Every constraint must hold; the first failure ends evaluation
//! - Bounds are inclusive
//! - Malformed operands fail closed
//! - Unknown keys are ignored

mod evaluate;
mod parser;

pub use evaluate::{
    evaluate_float, evaluate_float32, evaluate_integer, evaluate_string, LengthUnit, PatternCache,
};
pub use parser::{parse_tag, Constraint, ConstraintList, Operator};
