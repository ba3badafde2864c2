//! Record walker
//!
//! Walks a reflected record depth-first in field declaration order:
//!
//! 1. Push the field's constraints
//! 2. Classify the field's shape
//! 3. Evaluate a primitive, recurse into a record, dereference a pointer,
//!    or walk a sequence (a field pointer to a sequence walks the sequence)
//! 4. Pop the constraints
//! 5. Stop at the first failing field
//!
//! Constraints apply only at primitive leaves. An annotation on a record
//! field, or on a sequence of records, is parsed and pushed but never read.

use crate::observability::{event_enabled, log_event, Event};
use crate::reflect::{Node, RecordView, Shape, ShapeClass};
use crate::rules::{
    evaluate_float, evaluate_float32, evaluate_integer, evaluate_string, ConstraintList,
    PatternCache,
};

use super::context::TagStack;
use super::errors::{FieldPath, Violation, ViolationKind};
use super::ValidatorOptions;

/// Levels of pointer indirection accepted around the top-level record.
const MAX_TOP_LEVEL_INDIRECTION: usize = 1;

/// State of one validation call.
pub(crate) struct Walker<'o> {
    options: &'o ValidatorOptions,
    tags: TagStack,
    path: FieldPath,
    patterns: PatternCache,
}

impl<'o> Walker<'o> {
    pub(crate) fn new(options: &'o ValidatorOptions) -> Self {
        Self {
            options,
            tags: TagStack::new(),
            path: FieldPath::root(),
            patterns: PatternCache::new(),
        }
    }

    /// Entry point: accepts a record or a single pointer to one.
    pub(crate) fn enter(&mut self, shape: Shape<'_>, indirection: usize) -> Result<(), Violation> {
        match shape {
            Shape::Record(record) => self.walk_record(&record),
            Shape::Pointer(Some(target)) if indirection < MAX_TOP_LEVEL_INDIRECTION => {
                self.enter(target.reflect(), indirection + 1)
            }
            Shape::Pointer(None) => Err(self.violation(ViolationKind::NilPointer)),
            other => Err(self.violation(ViolationKind::NotARecord {
                found: other.class().name(),
            })),
        }
    }

    /// Current tag stack depth; zero outside a walk.
    pub(crate) fn tag_depth(&self) -> usize {
        self.tags.depth()
    }

    fn walk_record(&mut self, record: &RecordView<'_>) -> Result<(), Violation> {
        for field in record.fields() {
            self.path.push_field(field.name);
            self.tags.push(ConstraintList::parse(field.tag));

            let verdict = self.visit_field(field.value.reflect());

            self.tags.pop();
            self.path.pop();
            verdict?;
        }
        Ok(())
    }

    fn visit_field(&mut self, shape: Shape<'_>) -> Result<(), Violation> {
        match shape {
            Shape::Record(record) => self.walk_record(&record),
            Shape::Pointer(Some(target)) => match target.reflect() {
                Shape::Sequence(items) => self.walk_sequence(&items),
                pointee => self.visit_pointee(pointee),
            },
            Shape::Pointer(None) => {
                self.skip("nil pointer");
                Ok(())
            }
            Shape::Sequence(items) => self.walk_sequence(&items),
            Shape::Unsupported(kind) => {
                self.skip(kind);
                Ok(())
            }
            primitive => self.evaluate(&primitive),
        }
    }

    /// Pointee of a one-level pointer: records and primitives are visited.
    ///
    /// Sequences reach here only behind a sequence element and are skipped
    /// like any nested sequence.
    fn visit_pointee(&mut self, shape: Shape<'_>) -> Result<(), Violation> {
        match shape {
            Shape::Record(record) => self.walk_record(&record),
            Shape::Pointer(_) => {
                self.skip("pointer to pointer");
                Ok(())
            }
            Shape::Sequence(_) => {
                self.skip("pointer to sequence");
                Ok(())
            }
            Shape::Unsupported(kind) => {
                self.skip(kind);
                Ok(())
            }
            primitive => self.evaluate(&primitive),
        }
    }

    /// The first element's class decides the branch for every element.
    ///
    /// Sequences are expected to be homogeneous; an element of another
    /// class fails the field rather than being misclassified.
    fn walk_sequence(&mut self, items: &[Node<'_>]) -> Result<(), Violation> {
        let mut branch = None;

        for (index, item) in items.iter().enumerate() {
            let shape = item.reflect();
            let class = shape.class();
            let expected = *branch.get_or_insert(class);

            if matches!(expected, ShapeClass::Sequence | ShapeClass::Unsupported) {
                self.skip(match expected {
                    ShapeClass::Sequence => "nested sequence",
                    _ => "unsupported sequence element",
                });
                return Ok(());
            }

            self.path.push_index(index);
            let verdict = if class == expected {
                self.visit_element(shape)
            } else {
                Err(self.violation(ViolationKind::HeterogeneousSequence {
                    index,
                    expected: expected.name(),
                    found: class.name(),
                }))
            };
            self.path.pop();
            verdict?;
        }
        Ok(())
    }

    fn visit_element(&mut self, shape: Shape<'_>) -> Result<(), Violation> {
        match shape {
            Shape::Record(record) => self.walk_record(&record),
            Shape::Pointer(Some(target)) => self.visit_pointee(target.reflect()),
            Shape::Pointer(None) => {
                self.skip("nil pointer");
                Ok(())
            }
            Shape::Sequence(_) | Shape::Unsupported(_) => Ok(()),
            primitive => self.evaluate(&primitive),
        }
    }

    /// Checks a primitive against the constraints on top of the stack.
    fn evaluate(&mut self, shape: &Shape<'_>) -> Result<(), Violation> {
        let constraints = self.tags.top();
        let result = match *shape {
            Shape::Int(value) => evaluate_integer(i128::from(value), constraints),
            Shape::Uint(value) => evaluate_integer(i128::from(value), constraints),
            Shape::Float(value) => evaluate_float(value, constraints),
            Shape::Float32(value) => evaluate_float32(value, constraints),
            Shape::Str(value) => evaluate_string(
                value,
                constraints,
                self.options.length_unit,
                &mut self.patterns,
            ),
            _ => Ok(()),
        };
        result.map_err(|kind| self.violation(kind))
    }

    fn violation(&self, kind: ViolationKind) -> Violation {
        Violation::new(self.path.clone(), kind)
    }

    fn skip(&self, reason: &str) {
        if event_enabled(Event::FieldSkipped) {
            let path = self.path.to_string();
            log_event(Event::FieldSkipped, &[("path", path.as_str()), ("reason", reason)]);
        }
    }
}
