//! Shape classification
//!
//! Maps a reflected [`Shape`] to the branch the record walker takes.
//! Pointers are classified one level deep only; the pointee is classified
//! separately after dereferencing.

use std::fmt;

use super::Shape;

/// Kind of a primitive leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Signed integer of any width
    Int,
    /// Unsigned integer of any width
    Uint,
    /// Floating point of any width
    Float,
    /// UTF-8 string
    Str,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Uint => "uint",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Str => "string",
        }
    }
}

/// Walker branch for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    Primitive,
    Pointer,
    Record,
    Sequence,
    /// Maps, booleans and anything else without rules; skipped, never failed
    Unsupported,
}

impl ShapeClass {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeClass::Primitive => "primitive",
            ShapeClass::Pointer => "pointer",
            ShapeClass::Record => "record",
            ShapeClass::Sequence => "sequence",
            ShapeClass::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classifies a reflected shape.
pub fn classify(shape: &Shape<'_>) -> ShapeClass {
    match shape {
        Shape::Int(_) | Shape::Uint(_) | Shape::Float(_) | Shape::Float32(_) | Shape::Str(_) => {
            ShapeClass::Primitive
        }
        Shape::Pointer(_) => ShapeClass::Pointer,
        Shape::Record(_) => ShapeClass::Record,
        Shape::Sequence(_) => ShapeClass::Sequence,
        Shape::Unsupported(_) => ShapeClass::Unsupported,
    }
}

/// Returns the primitive kind, or `None` for non-primitive shapes.
pub fn primitive_kind(shape: &Shape<'_>) -> Option<PrimitiveKind> {
    match shape {
        Shape::Int(_) => Some(PrimitiveKind::Int),
        Shape::Uint(_) => Some(PrimitiveKind::Uint),
        Shape::Float(_) | Shape::Float32(_) => Some(PrimitiveKind::Float),
        Shape::Str(_) => Some(PrimitiveKind::Str),
        _ => None,
    }
}
