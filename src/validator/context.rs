//! Tag context stack
//!
//! Holds the constraint list of every field currently being visited, the
//! innermost on top. Each validation call owns its own stack, so concurrent
//! calls never observe each other's constraints.
//!
//! Invariant: depth before a field is visited equals depth after, on every
//! path including failures. A call starts and ends with an empty stack.

use crate::rules::ConstraintList;

static NO_CONSTRAINTS: ConstraintList = ConstraintList::empty();

#[derive(Debug, Default)]
pub(crate) struct TagStack {
    frames: Vec<ConstraintList>,
}

impl TagStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, constraints: ConstraintList) {
        self.frames.push(constraints);
    }

    pub(crate) fn pop(&mut self) -> Option<ConstraintList> {
        self.frames.pop()
    }

    /// Constraints of the innermost field; empty outside any field.
    pub(crate) fn top(&self) -> &ConstraintList {
        self.frames.last().unwrap_or(&NO_CONSTRAINTS)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_tag;

    #[test]
    fn test_top_is_innermost() {
        let mut stack = TagStack::new();
        assert!(stack.top().is_empty());

        stack.push(parse_tag("record,min:1"));
        stack.push(parse_tag("int,max:5"));
        assert_eq!(stack.top().iter().next().unwrap().operand, "5");

        stack.pop();
        assert_eq!(stack.top().iter().next().unwrap().operand, "1");

        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert!(stack.pop().is_none());
    }
}
