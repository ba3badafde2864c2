//! Primitive rule evaluators
//!
//! Each evaluator checks one leaf value against the constraint list active
//! for its field. All constraints must hold; evaluation stops at the first
//! failing constraint. Operands that do not parse fail the field.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::parser::{ConstraintList, Operator};
use crate::validator::ViolationKind;

/// Unit used when measuring string length for `min`/`max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// UTF-8 code units
    #[default]
    Bytes,
    /// Unicode scalar values
    Chars,
}

impl LengthUnit {
    pub fn measure(&self, value: &str) -> usize {
        match self {
            LengthUnit::Bytes => value.len(),
            LengthUnit::Chars => value.chars().count(),
        }
    }
}

/// Compiled patterns for the duration of one validation call.
///
/// Failed compilations are remembered too, so a broken pattern on a
/// sequence field is reported without recompiling it per element.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, Result<Regex, String>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&mut self, pattern: &str) -> Result<&Regex, ViolationKind> {
        let entry = self
            .compiled
            .entry(pattern.to_string())
            .or_insert_with(|| Regex::new(pattern).map_err(|e| e.to_string()));

        entry.as_ref().map_err(|reason| ViolationKind::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Integer evaluator, shared by signed and unsigned values.
///
/// Operands are parsed as `i128` so both `i64` and `u64` ranges fit and a
/// negative lower bound on an unsigned field is still well-formed.
pub fn evaluate_integer(value: i128, constraints: &ConstraintList) -> Result<(), ViolationKind> {
    for constraint in constraints {
        match constraint.op {
            Operator::Min => {
                let min = parse_integer(&constraint.op, &constraint.operand)?;
                if value < min {
                    return Err(ViolationKind::BelowMin {
                        value: value.to_string(),
                        min: constraint.operand.clone(),
                    });
                }
            }
            Operator::Max => {
                let max = parse_integer(&constraint.op, &constraint.operand)?;
                if value > max {
                    return Err(ViolationKind::AboveMax {
                        value: value.to_string(),
                        max: constraint.operand.clone(),
                    });
                }
            }
            Operator::Regex | Operator::Other(_) => {}
        }
    }
    Ok(())
}

/// Float evaluator. Bounds are inclusive; a NaN value fails any bound.
pub fn evaluate_float(value: f64, constraints: &ConstraintList) -> Result<(), ViolationKind> {
    check_float(value, &value, constraints, |bound| bound)
}

/// Single-precision float evaluator.
///
/// Bounds are rounded to `f32` before comparing, so a value written as
/// `0.3f32` passes `max:0.3`.
pub fn evaluate_float32(value: f32, constraints: &ConstraintList) -> Result<(), ViolationKind> {
    check_float(f64::from(value), &value, constraints, |bound| {
        f64::from(bound as f32)
    })
}

fn check_float(
    value: f64,
    shown: &dyn fmt::Display,
    constraints: &ConstraintList,
    round: fn(f64) -> f64,
) -> Result<(), ViolationKind> {
    for constraint in constraints {
        match constraint.op {
            Operator::Min => {
                let min = round(parse_float(&constraint.op, &constraint.operand)?);
                if value.is_nan() || value < min {
                    return Err(ViolationKind::BelowMin {
                        value: shown.to_string(),
                        min: constraint.operand.clone(),
                    });
                }
            }
            Operator::Max => {
                let max = round(parse_float(&constraint.op, &constraint.operand)?);
                if value.is_nan() || value > max {
                    return Err(ViolationKind::AboveMax {
                        value: shown.to_string(),
                        max: constraint.operand.clone(),
                    });
                }
            }
            Operator::Regex | Operator::Other(_) => {}
        }
    }
    Ok(())
}

/// String evaluator: length bounds plus pattern matching.
///
/// Patterns are used exactly as written; no anchors are added.
pub fn evaluate_string(
    value: &str,
    constraints: &ConstraintList,
    unit: LengthUnit,
    patterns: &mut PatternCache,
) -> Result<(), ViolationKind> {
    for constraint in constraints {
        match constraint.op {
            Operator::Min => {
                let min = parse_length(&constraint.op, &constraint.operand)?;
                let length = unit.measure(value);
                if length < min {
                    return Err(ViolationKind::TooShort {
                        length,
                        min: constraint.operand.clone(),
                    });
                }
            }
            Operator::Max => {
                let max = parse_length(&constraint.op, &constraint.operand)?;
                let length = unit.measure(value);
                if length > max {
                    return Err(ViolationKind::TooLong {
                        length,
                        max: constraint.operand.clone(),
                    });
                }
            }
            Operator::Regex => {
                let regex = patterns.get(&constraint.operand)?;
                if !regex.is_match(value) {
                    return Err(ViolationKind::PatternMismatch {
                        pattern: constraint.operand.clone(),
                    });
                }
            }
            Operator::Other(_) => {}
        }
    }
    Ok(())
}

fn parse_integer(op: &Operator, operand: &str) -> Result<i128, ViolationKind> {
    operand
        .parse::<i128>()
        .map_err(|_| malformed(op, operand))
}

fn parse_float(op: &Operator, operand: &str) -> Result<f64, ViolationKind> {
    match operand.parse::<f64>() {
        Ok(bound) if !bound.is_nan() => Ok(bound),
        _ => Err(malformed(op, operand)),
    }
}

fn parse_length(op: &Operator, operand: &str) -> Result<usize, ViolationKind> {
    operand
        .parse::<usize>()
        .map_err(|_| malformed(op, operand))
}

fn malformed(op: &Operator, operand: &str) -> ViolationKind {
    ViolationKind::MalformedOperand {
        op: op.key().to_string(),
        operand: operand.to_string(),
    }
}
