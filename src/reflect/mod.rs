//! Value reflection for the record walker
//!
//! Every validatable value reports its [`Shape`]: one of a closed set of
//! variants the walker knows how to traverse. Records list their fields
//! together with each field's constraint annotation.
//!
//! Rust types opt in through the [`Reflect`] trait, usually via the
//! [`impl_record!`](crate::impl_record) macro:
//!
//! ```
//! use fieldrule::impl_record;
//!
//! struct Account {
//!     login: String,
//!     age: u8,
//!     nickname: Option<String>,
//! }
//!
//! impl_record!(Account {
//!     login: "string,min:6,max:20",
//!     age: "int,min:1,max:120",
//!     nickname,
//! });
//!
//! let account = Account { login: "someone".into(), age: 33, nickname: None };
//! assert!(fieldrule::validate(&account));
//! ```

mod classify;
mod impls;

use std::fmt;

pub use classify::{classify, primitive_kind, PrimitiveKind, ShapeClass};

/// A value the record walker can inspect.
pub trait Reflect {
    /// Reports the shape of this value.
    ///
    /// Called at most once per visit; records build their field list here.
    fn reflect(&self) -> Shape<'_>;
}

/// Runtime shape of a reflected value.
pub enum Shape<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    /// Kept at single precision so bounds compare at the value's own width
    Float32(f32),
    Str(&'a str),
    /// Single level of indirection; `None` is a nil pointer
    Pointer(Option<Node<'a>>),
    Record(RecordView<'a>),
    Sequence(Vec<Node<'a>>),
    /// Anything without rules (maps, booleans, ...), named for diagnostics
    Unsupported(&'static str),
}

impl<'a> Shape<'a> {
    /// Builds a record shape from its type name and fields.
    pub fn record(name: &'a str, fields: Vec<Field<'a>>) -> Self {
        Shape::Record(RecordView::new(name, fields))
    }

    /// Builds a sequence shape borrowing every element.
    pub fn sequence<T: Reflect + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Shape::Sequence(items.into_iter().map(|item| Node::Borrowed(item)).collect())
    }

    /// Builds a pointer shape; `None` is a nil pointer.
    pub fn pointer<T: Reflect + 'a>(target: Option<&'a T>) -> Self {
        Shape::Pointer(target.map(|target| Node::Borrowed(target)))
    }

    pub fn class(&self) -> ShapeClass {
        classify(self)
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Int(v) => write!(f, "Int({})", v),
            Shape::Uint(v) => write!(f, "Uint({})", v),
            Shape::Float(v) => write!(f, "Float({})", v),
            Shape::Float32(v) => write!(f, "Float32({})", v),
            Shape::Str(v) => write!(f, "Str({:?})", v),
            Shape::Pointer(Some(_)) => write!(f, "Pointer(..)"),
            Shape::Pointer(None) => write!(f, "Pointer(nil)"),
            Shape::Record(view) => write!(f, "Record({})", view.name()),
            Shape::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            Shape::Unsupported(kind) => write!(f, "Unsupported({})", kind),
        }
    }
}

/// A reflected value, either borrowed from the caller or built on the fly.
///
/// Owned nodes exist for adapters (such as schema-bound documents) whose
/// children are views rather than stored values.
pub enum Node<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect + 'a>),
}

impl<'a> Node<'a> {
    pub fn owned(value: impl Reflect + 'a) -> Self {
        Node::Owned(Box::new(value))
    }

    pub fn reflect(&self) -> Shape<'_> {
        match self {
            Node::Borrowed(value) => value.reflect(),
            Node::Owned(value) => value.reflect(),
        }
    }
}

/// One field of a record: name, optional annotation, value.
pub struct Field<'a> {
    pub name: &'a str,
    pub tag: Option<&'a str>,
    pub value: Node<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, tag: Option<&'a str>, value: &'a dyn Reflect) -> Self {
        Self {
            name,
            tag,
            value: Node::Borrowed(value),
        }
    }

    pub fn tagged(name: &'a str, tag: &'a str, value: &'a dyn Reflect) -> Self {
        Self::new(name, Some(tag), value)
    }

    pub fn untagged(name: &'a str, value: &'a dyn Reflect) -> Self {
        Self::new(name, None, value)
    }

    pub fn with_node(name: &'a str, tag: Option<&'a str>, value: Node<'a>) -> Self {
        Self { name, tag, value }
    }
}

/// Fields of one record in declaration order.
pub struct RecordView<'a> {
    name: &'a str,
    fields: Vec<Field<'a>>,
}

impl<'a> RecordView<'a> {
    pub fn new(name: &'a str, fields: Vec<Field<'a>>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }
}

/// Implements [`Reflect`] for a struct as a record.
///
/// Fields are listed in declaration order, each optionally followed by its
/// annotation string. Unlisted struct fields are not visited.
#[macro_export]
macro_rules! impl_record {
    (@tag $tag:literal) => {
        ::core::option::Option::Some($tag)
    };
    (@tag) => {
        ::core::option::Option::None
    };
    ($ty:ident { $($field:ident $(: $tag:literal)?),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn reflect(&self) -> $crate::Shape<'_> {
                $crate::Shape::record(
                    ::core::stringify!($ty),
                    ::std::vec![
                        $(
                            $crate::Field::new(
                                ::core::stringify!($field),
                                $crate::impl_record!(@tag $($tag)?),
                                &self.$field,
                            ),
                        )*
                    ],
                )
            }
        }
    };
}
