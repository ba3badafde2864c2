//! Field annotation parser
//!
//! Annotation syntax:
//! - Comma-separated tokens
//! - Token 0 is a free-form label (conventionally the logical type name)
//! - Every later token is `key:value`, keys drawn from `min`, `max`, `regex`
//!
//! Example: `"string,min:6,max:20"`

use std::fmt;

use serde::Serialize;

/// Token separator inside an annotation
const TOKEN_SEPARATOR: char = ',';

/// Separator between a constraint key and its operand
const OPERAND_SEPARATOR: char = ':';

/// Constraint operator keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Lower bound (value for numbers, length for strings)
    Min,
    /// Upper bound (value for numbers, length for strings)
    Max,
    /// Pattern a string value must match
    Regex,
    /// Any key this crate does not know; ignored by every evaluator
    Other(String),
}

impl Operator {
    fn from_key(key: &str) -> Self {
        match key {
            "min" => Operator::Min,
            "max" => Operator::Max,
            "regex" => Operator::Regex,
            other => Operator::Other(other.to_string()),
        }
    }

    /// Returns the annotation key for this operator
    pub fn key(&self) -> &str {
        match self {
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Regex => "regex",
            Operator::Other(key) => key,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A single `(operator, operand)` pair.
///
/// The operand is kept as the literal text from the annotation; numeric
/// interpretation happens at evaluation time so that a malformed operand
/// fails the field it belongs to instead of the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub op: Operator,
    pub operand: String,
}

impl Constraint {
    pub fn new(op: Operator, operand: impl Into<String>) -> Self {
        Self {
            op,
            operand: operand.into(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.op, self.operand)
    }
}

/// Ordered constraints parsed from one field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstraintList {
    constraints: Vec<Constraint>,
}

impl ConstraintList {
    /// An empty list (no declared constraints, always satisfied)
    pub const fn empty() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Parses an optional annotation. `None` and `""` both yield an empty list.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) => parse_tag(tag),
            None => Self::empty(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl From<Vec<Constraint>> for ConstraintList {
    fn from(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }
}

impl<'a> IntoIterator for &'a ConstraintList {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

/// Parses an annotation string into its constraint list.
///
/// No syntax checking is done here. A token without `:` becomes a
/// constraint with an empty operand, which later fails evaluation.
pub fn parse_tag(tag: &str) -> ConstraintList {
    let constraints = tag
        .split(TOKEN_SEPARATOR)
        .skip(1)
        .filter(|token| !token.trim().is_empty())
        .map(|token| match token.split_once(OPERAND_SEPARATOR) {
            Some((key, operand)) => Constraint::new(Operator::from_key(key.trim()), operand),
            None => Constraint::new(Operator::from_key(token.trim()), ""),
        })
        .collect();

    ConstraintList { constraints }
}
