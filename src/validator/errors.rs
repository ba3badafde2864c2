//! Validation failure types
//!
//! A failed validation yields exactly one [`Violation`]: the first field
//! that failed, in depth-first declaration order, and why.

use std::fmt;

use thiserror::Error;

/// Why a field (or the top-level value) failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationKind {
    #[error("value {value} is below min {min}")]
    BelowMin { value: String, min: String },

    #[error("value {value} is above max {max}")]
    AboveMax { value: String, max: String },

    #[error("length {length} is below min {min}")]
    TooShort { length: usize, min: String },

    #[error("length {length} is above max {max}")]
    TooLong { length: usize, max: String },

    #[error("value does not match pattern '{pattern}'")]
    PatternMismatch { pattern: String },

    #[error("malformed operand for '{op}': '{operand}'")]
    MalformedOperand { op: String, operand: String },

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("expected a record, found {found}")]
    NotARecord { found: &'static str },

    #[error("nil pointer where a record was expected")]
    NilPointer,

    #[error("sequence element {index} is a {found}, but element 0 is a {expected}")]
    HeterogeneousSequence {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl ViolationKind {
    /// Stable code for the failure reason
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::BelowMin { .. } => "RULE_BELOW_MIN",
            ViolationKind::AboveMax { .. } => "RULE_ABOVE_MAX",
            ViolationKind::TooShort { .. } => "RULE_TOO_SHORT",
            ViolationKind::TooLong { .. } => "RULE_TOO_LONG",
            ViolationKind::PatternMismatch { .. } => "RULE_PATTERN_MISMATCH",
            ViolationKind::MalformedOperand { .. } => "RULE_MALFORMED_OPERAND",
            ViolationKind::InvalidPattern { .. } => "RULE_INVALID_PATTERN",
            ViolationKind::NotARecord { .. } => "INPUT_NOT_A_RECORD",
            ViolationKind::NilPointer => "INPUT_NIL_POINTER",
            ViolationKind::HeterogeneousSequence { .. } => "SHAPE_HETEROGENEOUS_SEQUENCE",
        }
    }

    /// Whether the failure concerns the value's shape rather than a rule
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ViolationKind::NotARecord { .. }
                | ViolationKind::NilPointer
                | ViolationKind::HeterogeneousSequence { .. }
        )
    }
}

/// One step from the validated value to a failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a field relative to the validated record, e.g. `asset.houses[1].cost`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub(crate) fn push_field(&mut self, name: &str) {
        self.segments.push(PathSegment::Field(name.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$root");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// The first failure found while validating a value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field '{path}': {kind}")]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: FieldPath, kind: ViolationKind) -> Self {
        Self { path, kind }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
